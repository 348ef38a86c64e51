use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that must not appear in a derived filename component:
    /// path separators, characters reserved by common filesystems, and
    /// ASCII control characters. Everything else (including non-ASCII
    /// letters) passes through unchanged.
    pub static ref FILENAME_UNSAFE_REGEX: Regex = Regex::new(r#"[\x00-\x1f/\\:*?"<>|]"#).unwrap();
}

/// Sanitize a user-provided string for use as a filename component.
///
/// The uploader's name is embedded in derived filenames; this keeps a
/// hostile name from escaping the subject directory or producing a name
/// the filesystem rejects. Safe names come back unchanged.
pub fn sanitize_filename_component(name: &str) -> String {
    FILENAME_UNSAFE_REGEX
        .replace_all(name.trim(), "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_names_unchanged() {
        assert_eq!(sanitize_filename_component("Rafi"), "Rafi");
        assert_eq!(sanitize_filename_component("Rafi Ahmed"), "Rafi Ahmed");
        assert_eq!(sanitize_filename_component("user-123_x"), "user-123_x");
    }

    #[test]
    fn test_non_ascii_names_unchanged() {
        assert_eq!(sanitize_filename_component("রাফি"), "রাফি");
    }

    #[test]
    fn test_path_separators_replaced() {
        assert_eq!(sanitize_filename_component("a/b"), "a_b");
        assert_eq!(sanitize_filename_component("a\\b"), "a_b");
        assert_eq!(sanitize_filename_component("../up"), ".._up");
    }

    #[test]
    fn test_reserved_characters_replaced() {
        assert_eq!(sanitize_filename_component("a:b*c?d"), "a_b_c_d");
        assert_eq!(sanitize_filename_component("a<b>c|d"), "a_b_c_d");
        assert_eq!(sanitize_filename_component("say \"hi\""), "say _hi_");
    }

    #[test]
    fn test_control_characters_replaced() {
        assert_eq!(sanitize_filename_component("a\x00b\nc"), "a_b_c");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(sanitize_filename_component("  Rafi  "), "Rafi");
    }
}
