/// URL slug for a blog title: lowercase, spaces to hyphens, everything
/// outside `[a-z0-9_-]` dropped.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("Tips Taaruf yang Berkah!"), "tips-taaruf-yang-berkah");
    }

    #[test]
    fn each_space_becomes_a_hyphen() {
        assert_eq!(slugify("a  b"), "a--b");
    }

    #[test]
    fn non_ascii_letters_are_removed() {
        assert_eq!(slugify("Café_Ramadhan 1445"), "caf_ramadhan-1445");
    }
}
