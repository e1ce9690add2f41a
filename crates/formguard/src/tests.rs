//! Property-based tests for the registry and the built-in rules.

#[cfg(test)]
mod property_tests {
    use crate::error::RuleError;
    use crate::registry::RuleSet;
    use crate::rule::Rule;
    use crate::rules::*;
    use proptest::prelude::*;

    // Field names the registry never sees
    fn field_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_.]{0,20}"
    }

    // Any value, including empty and non-ASCII
    fn value_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), ".{0,40}"]
    }

    fn fail_with(message: String) -> impl Fn(&str) -> Result<(), RuleError> + Send + Sync {
        move |_: &str| Err(RuleError::new("always", message.clone()))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Unregistered fields pass for every value
        #[test]
        fn unregistered_field_always_valid(field in field_strategy(), value in value_strategy()) {
            let rules = RuleSet::new().rule("registered", NotEmpty, "");
            prop_assume!(field != "registered");
            prop_assert!(rules.validate_key_value(&field, &value).is_ok());
        }

        // k failing constraints interleaved with passing ones -> k messages, in order
        #[test]
        fn failing_constraints_reported_in_order(
            pattern in prop::collection::vec(any::<bool>(), 0..12)
        ) {
            let mut rules = RuleSet::new();
            let mut expected = Vec::new();
            for (index, fails) in pattern.iter().enumerate() {
                if *fails {
                    let message = format!("failure {index}");
                    rules.add("field", fail_with(message.clone()), "");
                    expected.push(message);
                } else {
                    rules.add("field", |_: &str| Ok::<(), RuleError>(()), "");
                }
            }

            match rules.validate_key_value("field", "value") {
                Ok(()) => prop_assert!(expected.is_empty()),
                Err(failures) => {
                    let messages: Vec<String> = failures.into_iter().map(|f| f.message).collect();
                    prop_assert_eq!(messages, expected);
                }
            }
        }

        // Override messages replace the reason one-for-one
        #[test]
        fn override_message_replaces_reason(message in "[a-zA-Z ]{1,30}") {
            let rules = RuleSet::new().rule("n", Numeric, &message);
            let failures = rules.validate_key_value("n", "x").unwrap_err();
            prop_assert_eq!(failures.len(), 1);
            prop_assert_eq!(&failures[0].message, &message);
            prop_assert_eq!(&failures[0].code, "numeric");
        }

        // Digit strings are numeric
        #[test]
        fn numeric_accepts_digits(value in "[0-9]{1,30}") {
            prop_assert!(Numeric.validate(&value).is_ok());
        }

        // Anything with a non-digit is not
        #[test]
        fn numeric_rejects_non_digits(
            prefix in "[0-9]{0,5}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,5}"
        ) {
            let value = format!("{prefix}{bad}{suffix}");
            prop_assert!(Numeric.validate(&value).is_err());
        }

        // Lowercase hex of the right length
        #[test]
        fn object_id_and_sha1_lengths(oid in "[a-f0-9]{24}", sha in "[a-f0-9]{40}") {
            prop_assert!(ObjectId.validate(&oid).is_ok());
            prop_assert!(Sha1.validate(&sha).is_ok());
            prop_assert!(ObjectId.validate(&oid[1..]).is_err());
            prop_assert!(Sha1.validate(&sha[1..]).is_err());
        }

        // Five digits and nothing else
        #[test]
        fn zip_code_exact_length(zip in "[0-9]{5}", extra in "[0-9]{1,3}") {
            prop_assert!(ZipCode.validate(&zip).is_ok());
            let longer = format!("{zip}{extra}");
            prop_assert!(ZipCode.validate(&longer).is_err());
        }

        // Membership is exact
        #[test]
        fn equals_any_membership(
            values in prop::collection::vec("[a-z]{1,8}", 1..6),
            candidate in "[a-z]{1,8}"
        ) {
            let rule = EqualsAny::new(values.clone());
            prop_assert_eq!(rule.validate(&candidate).is_ok(), values.contains(&candidate));
            for value in &values {
                prop_assert!(rule.validate(value).is_ok());
            }
        }

        // add_required always reports not-empty first on empty input
        #[test]
        fn required_reports_not_empty_first(message in "[a-z ]{1,20}") {
            let rules = RuleSet::new().required("f", Sha1, &message);
            let failures = rules.validate_key_value("f", "").unwrap_err();
            prop_assert_eq!(failures.len(), 2);
            prop_assert_eq!(failures[0].message.as_str(), NotEmpty::MESSAGE);
            prop_assert_eq!(&failures[1].message, &message);
        }
    }

    #[test]
    fn format_rules_accept_empty() {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(Url),
            Box::new(Email),
            Box::new(Numeric),
            Box::new(Alpha),
            Box::new(ObjectId),
            Box::new(ZipCode),
        ];
        for rule in &rules {
            let name = rule.rule_name();
            assert!(rule.validate("").is_ok(), "{name} rejected \"\"");
        }
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(Numeric.validate("a23").is_err());
        assert!(Email.validate("Test_test.com").is_err());
        assert!(Sha1.validate("ababcbabcabcbac").is_err());
        assert!(ObjectId.validate("507f1f77bcf86cd79939011").is_err());
    }
}
