//! Ownership resolution by the tight-prefix naming rule.

/// Returns the target type that owns `candidate`, if any.
///
/// A type `T` owns `candidate` when `candidate` starts with `T` and the
/// remaining suffix is non-empty and starts with an uppercase letter or an
/// underscore. The first matching type in `targets` order wins, even when
/// a later type is a longer prefix.
///
/// # Examples
///
/// ```
/// use opgen_core::owner;
///
/// assert_eq!(owner("ExampleLogger", &["Example"]), Some("Example"));
/// assert_eq!(owner("Examples", &["Example"]), None);
/// assert_eq!(owner("Example_Alt", &["Example"]), Some("Example"));
/// ```
#[must_use]
pub fn owner<'t, S: AsRef<str>>(candidate: &str, targets: &'t [S]) -> Option<&'t str> {
    targets
        .iter()
        .map(AsRef::as_ref)
        .find(|target| is_tight_prefix(target, candidate))
}

fn is_tight_prefix(prefix: &str, candidate: &str) -> bool {
    candidate
        .strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_uppercase() || next == '_')
}

#[cfg(test)]
mod tests {
    //! Unit tests for the tight-prefix ownership rule.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::capital_suffix("ExampleLogger", &["Example"], Some("Example"))]
    #[case::lowercase_suffix("Examples", &["Example"], None)]
    #[case::underscore_suffix("Example_Alt", &["Example"], Some("Example"))]
    #[case::exact_name("Example", &["Example"], None)]
    #[case::no_prefix("OtherName", &["Example"], None)]
    #[case::digit_suffix("Example2", &["Example"], None)]
    #[case::unicode_upper("ExampleÉtat", &["Example"], Some("Example"))]
    #[case::no_targets("ExampleName", &[], None)]
    fn resolves_owner(
        #[case] candidate: &str,
        #[case] targets: &[&str],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(owner(candidate, targets), expected);
    }

    #[test]
    fn first_match_wins_over_longest_prefix() {
        let targets = ["Config", "ConfigFile"];
        assert_eq!(owner("ConfigFilePath", &targets), Some("Config"));

        let reordered = ["ConfigFile", "Config"];
        assert_eq!(owner("ConfigFilePath", &reordered), Some("ConfigFile"));
    }

    #[test]
    fn reordering_never_changes_whether_a_match_exists() {
        let names = ["ConfigFilePath", "Configure", "Config_X", "FilePath", "Cfg"];
        let forward = ["Config", "ConfigFile", "File"];
        let backward = ["File", "ConfigFile", "Config"];
        for name in names {
            assert_eq!(
                owner(name, &forward).is_some(),
                owner(name, &backward).is_some(),
                "match set differs for {name}"
            );
        }
    }

    #[test]
    fn accepts_owned_target_lists() {
        let targets = vec!["Example".to_owned()];
        assert_eq!(owner("ExampleSize", &targets), Some("Example"));
    }
}
