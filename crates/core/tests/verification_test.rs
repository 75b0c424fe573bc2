use careslot_core::verification::PhoneVerification;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

#[test]
fn test_generate_produces_six_digit_code() {
    let mut verification = PhoneVerification::unverified();
    let code = verification.generate();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(verification.code, Some(code));
    assert!(!verification.verified);
    assert!(verification.is_pending());
}

#[test]
fn test_generate_is_deterministic_with_seeded_rng() {
    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);

    let mut first = PhoneVerification::unverified();
    let mut second = PhoneVerification::unverified();

    assert_eq!(first.generate_with(&mut rng_a), second.generate_with(&mut rng_b));
}

#[test]
fn test_verify_success_marks_verified_and_clears_code() {
    let mut verification = PhoneVerification::unverified();
    let code = verification.generate();

    assert!(verification.verify(&code));
    assert!(verification.verified);
    assert_eq!(verification.code, None);
    assert!(!verification.is_pending());
}

#[test]
fn test_verify_same_code_twice_fails_second_time() {
    let mut verification = PhoneVerification::unverified();
    let code = verification.generate();

    assert!(verification.verify(&code));
    // The code was cleared on success, so replaying it must fail.
    assert!(!verification.verify(&code));
    assert!(verification.verified);
}

#[rstest]
#[case("482913", "482913", true)]
#[case("482913", "  482913  ", true)]
#[case("482913", "\t482913\n", true)]
#[case("482913", "482914", false)]
#[case("482913", "", false)]
#[case("482913", "48291", false)]
fn test_verify_trims_whitespace_and_compares_exactly(
    #[case] stored: &str,
    #[case] submitted: &str,
    #[case] expected: bool,
) {
    let mut verification =
        PhoneVerification::from_parts(Some(stored.to_string()), false);

    assert_eq!(verification.verify(submitted), expected);
    assert_eq!(verification.verified, expected);
}

#[test]
fn test_verify_without_outstanding_code_fails() {
    let mut verification = PhoneVerification::unverified();

    assert!(!verification.verify("123456"));
    assert!(!verification.verified);
}

#[test]
fn test_failed_verify_leaves_state_untouched() {
    let mut verification =
        PhoneVerification::from_parts(Some("482913".to_string()), false);

    assert!(!verification.verify("000000"));
    assert_eq!(verification.code, Some("482913".to_string()));
    assert!(!verification.verified);
    assert!(verification.is_pending());
}

#[test]
fn test_resend_overwrites_previous_code() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut verification = PhoneVerification::unverified();

    let first = verification.generate_with(&mut rng);
    let second = verification.generate_with(&mut rng);

    // Only the latest code is stored and accepted.
    assert_eq!(verification.code, Some(second.clone()));
    if first != second {
        assert!(!verification.clone().verify(&first));
    }
    assert!(verification.verify(&second));
}
