/// Picks the English form matching `count`. The plural defaults to `singular` + "s".
pub fn pluralize(count: u64, singular: &str, plural: Option<&str>) -> String {
    if count == 1 {
        return singular.to_string();
    }

    match plural {
        Some(plural) => plural.to_string(),
        None => format!("{singular}s"),
    }
}

pub fn pluralize_s(count: u64, singular: &str) -> String {
    pluralize(count, singular, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_only_for_exactly_one() {
        assert_eq!(pluralize_s(1, "system"), "system");
        assert_eq!(pluralize_s(0, "system"), "systems");
        assert_eq!(pluralize_s(5, "system"), "systems");
    }

    #[test]
    fn explicit_plural_form_is_used() {
        assert_eq!(pluralize(1, "is", Some("are")), "is");
        assert_eq!(pluralize(2, "is", Some("are")), "are");
        assert_eq!(pluralize(0, "has", Some("have")), "have");
    }
}
