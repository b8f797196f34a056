use super::*;

#[test]
fn credentials_are_trimmed_and_required() {
    assert_eq!(validate_credentials("  admin ", "secret"), Ok(("admin".to_owned(), "secret".to_owned())));
    assert_eq!(validate_credentials("   ", "secret"), Err("Please enter username and password"));
    assert_eq!(validate_credentials("admin", ""), Err("Please enter username and password"));
}

#[test]
fn password_whitespace_is_kept() {
    assert_eq!(validate_credentials("admin", " pw "), Ok(("admin".to_owned(), " pw ".to_owned())));
}

#[test]
fn tfa_code_must_be_six_characters() {
    assert_eq!(validate_tfa_code(" 123456 "), Ok("123456".to_owned()));
    assert_eq!(validate_tfa_code("12345"), Err("Please enter a valid 6-digit code"));
    assert_eq!(validate_tfa_code("1234567"), Err("Please enter a valid 6-digit code"));
    assert_eq!(validate_tfa_code(""), Err("Please enter a valid 6-digit code"));
}

#[test]
fn setup_flag_wins_over_need_flag() {
    let both = AuthResponse { token: "t".to_owned(), need_tfa: true, setup_tfa: true };
    assert_eq!(auth_outcome(both), AuthOutcome::SetupTfa("t".to_owned()));

    let need = AuthResponse { token: "t".to_owned(), need_tfa: true, setup_tfa: false };
    assert_eq!(auth_outcome(need), AuthOutcome::NeedTfa("t".to_owned()));

    assert_eq!(auth_outcome(AuthResponse { token: "t".to_owned(), ..AuthResponse::default() }), AuthOutcome::Complete("t".to_owned()));
}

#[test]
fn login_errors_show_backend_text_or_connectivity_hint() {
    let rejected = ApiError::Status { status: 403, message: "Authentication failed (403)".to_owned() };
    assert_eq!(login_error_message(&rejected), "Authentication failed (403)");
    assert_eq!(
        login_error_message(&ApiError::Network("connection refused".to_owned())),
        "Unable to connect to server. Please try again."
    );
}

#[test]
fn rejected_codes_prefer_backend_error() {
    let with_error = TfaVerifyResponse { ok: false, error: Some("expired".to_owned()) };
    assert_eq!(rejected_code_message(&with_error, false), "expired");

    let bare = TfaVerifyResponse::default();
    assert_eq!(rejected_code_message(&bare, false), "Invalid verification code");
    assert_eq!(rejected_code_message(&bare, true), "Invalid verification code. Please try again.");
}

#[test]
fn setup_response_becomes_qr_panel() {
    let ready = TfaSetupResponse { qr: Some("iVBOR".to_owned()), secret: Some("JBSW".to_owned()), error: None };
    assert_eq!(
        setup_state(ready),
        SetupState::Ready { qr: "data:image/png;base64,iVBOR".to_owned(), secret: "JBSW".to_owned() }
    );

    let failed = TfaSetupResponse { error: Some("user not found".to_owned()), ..TfaSetupResponse::default() };
    assert_eq!(setup_state(failed), SetupState::Failed("user not found".to_owned()));

    assert_eq!(
        setup_state(TfaSetupResponse::default()),
        SetupState::Failed("Failed to load TFA setup. Please try again.".to_owned())
    );
}
