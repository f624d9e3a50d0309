//! Login flow state machine. The sign-in screen renders whatever state this
//! machine is in; every transition consumes the previous state, so one-time
//! codes typed for an earlier step cannot leak into a later request.
//!
//! Flow Overview: a credentials submit either authenticates, opens an MFA
//! challenge, or reports a rejection. A challenge submit resends credentials
//! with exactly one code attached. Accounts without MFA get an enrollment
//! prompt after sign-in and may skip it a limited number of times.

use crate::app_lib::AppError;
use crate::features::auth::types::{LoginRequest, MfaEnrollResponse};

/// Shown beneath the challenge inputs until the user submits a code.
pub const CHALLENGE_PROMPT: &str = "Enter your 6-digit MFA code or a recovery code.";
/// Shown when the backend rejects a submitted MFA or recovery code.
pub const INVALID_CODE_MESSAGE: &str = "Invalid code. Please try again.";
/// Shown for any other rejected sign-in attempt.
pub const REJECTED_MESSAGE: &str = "Login failed. Check your credentials.";

/// One step of the sign-in screen. Code inputs live inside the state that
/// uses them and nowhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginFlow {
    /// Email and password form, optionally showing the last rejection.
    Credentials { error: Option<String> },
    /// Second factor required. `use_recovery` selects which of the two code
    /// inputs is active; only the active one is ever submitted.
    MfaChallenge {
        code: String,
        recovery_code: String,
        use_recovery: bool,
        error: Option<String>,
    },
    /// Signed in, but the account has no MFA yet.
    EnrollmentPrompt {
        remaining_skips: i64,
        error: Option<String>,
    },
    /// Authenticator setup in progress for a fresh secret.
    EnrollmentSetup {
        secret: String,
        otpauth_url: String,
        code: String,
        error: Option<String>,
    },
    /// Recovery codes shown exactly once after a successful verification.
    RecoveryCodes { codes: Vec<String> },
    /// Terminal state; the screen hands over to the router.
    Authenticated,
}

/// Discriminant of `LoginFlow`. The sign-in screen keys its step rendering
/// on this so field edits update inputs in place instead of remounting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStep {
    Credentials,
    Challenge,
    EnrollmentPrompt,
    EnrollmentSetup,
    RecoveryCodes,
    Authenticated,
}

/// Result of one sign-in attempt after the token grant and account lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success {
        enrollment_required: bool,
        remaining_skips: i64,
    },
    /// The account has MFA enabled and no code was supplied.
    MfaRequired,
    /// A code was supplied and the backend did not accept it.
    InvalidCode,
    /// Anything else: bad credentials, transport failures, server errors.
    Rejected(String),
}

/// Maps a failed `/auth/token` call onto a flow outcome. The backend signals
/// the MFA cases through the 401 detail string.
pub fn classify_login_error(error: &AppError) -> LoginOutcome {
    match error {
        AppError::Http { status: 401, message } => match message.as_str() {
            "MFA code required" => LoginOutcome::MfaRequired,
            "Invalid MFA code" | "Invalid recovery code" | "Invalid code" => {
                LoginOutcome::InvalidCode
            }
            _ => LoginOutcome::Rejected(REJECTED_MESSAGE.to_string()),
        },
        other => LoginOutcome::Rejected(other.to_string()),
    }
}

/// Extracts the backend detail for enrollment and skip failures, falling back
/// to the full error display.
pub fn surface_message(error: &AppError) -> String {
    match error {
        AppError::Http { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl LoginFlow {
    pub fn initial() -> Self {
        LoginFlow::Credentials { error: None }
    }

    pub fn step(&self) -> FlowStep {
        match self {
            LoginFlow::Credentials { .. } => FlowStep::Credentials,
            LoginFlow::MfaChallenge { .. } => FlowStep::Challenge,
            LoginFlow::EnrollmentPrompt { .. } => FlowStep::EnrollmentPrompt,
            LoginFlow::EnrollmentSetup { .. } => FlowStep::EnrollmentSetup,
            LoginFlow::RecoveryCodes { .. } => FlowStep::RecoveryCodes,
            LoginFlow::Authenticated => FlowStep::Authenticated,
        }
    }

    /// Message to surface for the current step, if any.
    pub fn error(&self) -> Option<String> {
        match self {
            LoginFlow::Credentials { error }
            | LoginFlow::MfaChallenge { error, .. }
            | LoginFlow::EnrollmentPrompt { error, .. }
            | LoginFlow::EnrollmentSetup { error, .. } => error.clone(),
            _ => None,
        }
    }

    /// Value of the active challenge input.
    pub fn active_code(&self) -> String {
        match self {
            LoginFlow::MfaChallenge {
                code,
                recovery_code,
                use_recovery,
                ..
            } => {
                if *use_recovery {
                    recovery_code.clone()
                } else {
                    code.clone()
                }
            }
            _ => String::new(),
        }
    }

    pub fn uses_recovery(&self) -> bool {
        matches!(
            self,
            LoginFlow::MfaChallenge {
                use_recovery: true,
                ..
            }
        )
    }

    /// Value of the verification code input during setup.
    pub fn enrollment_code(&self) -> String {
        match self {
            LoginFlow::EnrollmentSetup { code, .. } => code.clone(),
            _ => String::new(),
        }
    }

    /// Skips still available on the enrollment prompt; zero elsewhere.
    pub fn remaining_skips(&self) -> i64 {
        match self {
            LoginFlow::EnrollmentPrompt {
                remaining_skips, ..
            } => *remaining_skips,
            _ => 0,
        }
    }

    /// Builds the `/auth/token` payload for the current step. In a challenge,
    /// exactly one code is attached, chosen by the active input.
    pub fn attempt_request(&self, email: &str, password: &str) -> LoginRequest {
        let (mfa_code, recovery_code) = match self {
            LoginFlow::MfaChallenge {
                code,
                recovery_code,
                use_recovery,
                ..
            } => {
                if *use_recovery {
                    (None, non_empty(recovery_code))
                } else {
                    (non_empty(code), None)
                }
            }
            _ => (None, None),
        };

        LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            mfa_code,
            recovery_code,
        }
    }

    /// Applies the outcome of a sign-in attempt. Previous code inputs are
    /// dropped with the consumed state.
    pub fn resolve_attempt(self, outcome: LoginOutcome) -> Self {
        match outcome {
            LoginOutcome::Success {
                enrollment_required: false,
                ..
            } => LoginFlow::Authenticated,
            LoginOutcome::Success {
                enrollment_required: true,
                remaining_skips,
            } => LoginFlow::EnrollmentPrompt {
                remaining_skips,
                error: None,
            },
            LoginOutcome::MfaRequired => LoginFlow::MfaChallenge {
                code: String::new(),
                recovery_code: String::new(),
                use_recovery: false,
                error: None,
            },
            LoginOutcome::InvalidCode => match self {
                LoginFlow::MfaChallenge { use_recovery, .. } => LoginFlow::MfaChallenge {
                    code: String::new(),
                    recovery_code: String::new(),
                    use_recovery,
                    error: Some(INVALID_CODE_MESSAGE.to_string()),
                },
                _ => LoginFlow::Credentials {
                    error: Some(REJECTED_MESSAGE.to_string()),
                },
            },
            LoginOutcome::Rejected(message) => LoginFlow::Credentials {
                error: Some(message),
            },
        }
    }

    /// Abandons a challenge and returns to the credentials form.
    pub fn back_to_credentials(self) -> Self {
        LoginFlow::Credentials { error: None }
    }

    /// Switches between the TOTP and recovery inputs, clearing both so a code
    /// typed for one kind is never sent as the other.
    pub fn toggle_code_kind(self) -> Self {
        match self {
            LoginFlow::MfaChallenge { use_recovery, .. } => LoginFlow::MfaChallenge {
                code: String::new(),
                recovery_code: String::new(),
                use_recovery: !use_recovery,
                error: None,
            },
            other => other,
        }
    }

    /// Writes the active code input in a challenge.
    pub fn set_active_code(&mut self, value: String) {
        if let LoginFlow::MfaChallenge {
            code,
            recovery_code,
            use_recovery,
            ..
        } = self
        {
            if *use_recovery {
                *recovery_code = value;
            } else {
                *code = value;
            }
        }
    }

    /// True once the active challenge input holds something submittable.
    pub fn can_submit_challenge(&self) -> bool {
        match self {
            LoginFlow::MfaChallenge {
                code,
                recovery_code,
                use_recovery,
                ..
            } => {
                if *use_recovery {
                    !recovery_code.trim().is_empty()
                } else {
                    !code.trim().is_empty()
                }
            }
            _ => false,
        }
    }

    /// True when the enrollment prompt may be skipped at all.
    pub fn can_skip(&self) -> bool {
        matches!(
            self,
            LoginFlow::EnrollmentPrompt { remaining_skips, .. } if *remaining_skips > 0
        )
    }

    /// Moves from the prompt into setup once the backend issued a secret.
    pub fn begin_enrollment(self, enrollment: MfaEnrollResponse) -> Self {
        LoginFlow::EnrollmentSetup {
            secret: enrollment.secret,
            otpauth_url: enrollment.otpauth_url,
            code: String::new(),
            error: None,
        }
    }

    /// Records a failed enroll or skip call without leaving the prompt.
    pub fn enrollment_failed(self, message: String) -> Self {
        match self {
            LoginFlow::EnrollmentPrompt {
                remaining_skips, ..
            } => LoginFlow::EnrollmentPrompt {
                remaining_skips,
                error: Some(message),
            },
            other => other,
        }
    }

    /// Writes the verification code input during setup.
    pub fn set_enrollment_code(&mut self, value: String) {
        if let LoginFlow::EnrollmentSetup { code, .. } = self {
            *code = value;
        }
    }

    /// True once the setup code could be a TOTP value.
    pub fn can_verify_enrollment(&self) -> bool {
        matches!(
            self,
            LoginFlow::EnrollmentSetup { code, .. } if code.trim().len() >= 6
        )
    }

    /// Clears the rejected setup code and surfaces the failure.
    pub fn verify_failed(self, error: &AppError) -> Self {
        match self {
            LoginFlow::EnrollmentSetup {
                secret,
                otpauth_url,
                ..
            } => {
                let message = match error {
                    AppError::Http { status: 400, message } if message == "Invalid code" => {
                        INVALID_CODE_MESSAGE.to_string()
                    }
                    other => surface_message(other),
                };
                LoginFlow::EnrollmentSetup {
                    secret,
                    otpauth_url,
                    code: String::new(),
                    error: Some(message),
                }
            }
            other => other,
        }
    }

    /// Shows the freshly issued recovery codes after a verified setup.
    pub fn verify_succeeded(self, codes: Vec<String>) -> Self {
        LoginFlow::RecoveryCodes { codes }
    }

    /// Finishes the flow once the codes were acknowledged or a skip was
    /// granted.
    pub fn finish(self) -> Self {
        LoginFlow::Authenticated
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, detail: &str) -> AppError {
        AppError::Http {
            status,
            message: detail.to_string(),
        }
    }

    #[test]
    fn password_only_sign_in_authenticates() {
        let flow = LoginFlow::initial().resolve_attempt(LoginOutcome::Success {
            enrollment_required: false,
            remaining_skips: 0,
        });

        assert_eq!(flow, LoginFlow::Authenticated);
    }

    #[test]
    fn mfa_account_walks_through_challenge() {
        let outcome = classify_login_error(&http(401, "MFA code required"));
        assert_eq!(outcome, LoginOutcome::MfaRequired);

        let mut flow = LoginFlow::initial().resolve_attempt(outcome);
        assert!(matches!(
            flow,
            LoginFlow::MfaChallenge { ref code, ref recovery_code, use_recovery: false, error: None }
                if code.is_empty() && recovery_code.is_empty()
        ));
        assert!(!flow.can_submit_challenge());

        flow.set_active_code("123456".to_string());
        assert!(flow.can_submit_challenge());

        let request = flow.attempt_request(" handler@example.com ", "pw");
        assert_eq!(request.email, "handler@example.com");
        assert_eq!(request.mfa_code.as_deref(), Some("123456"));
        assert_eq!(request.recovery_code, None);

        let flow = flow.resolve_attempt(LoginOutcome::Success {
            enrollment_required: false,
            remaining_skips: 0,
        });
        assert_eq!(flow, LoginFlow::Authenticated);
    }

    #[test]
    fn invalid_code_clears_inputs_and_keeps_kind() {
        let mut flow = LoginFlow::initial().resolve_attempt(LoginOutcome::MfaRequired);
        flow = flow.toggle_code_kind();
        flow.set_active_code("abcd-1234".to_string());

        let outcome = classify_login_error(&http(401, "Invalid recovery code"));
        assert_eq!(outcome, LoginOutcome::InvalidCode);

        let flow = flow.resolve_attempt(outcome);
        match &flow {
            LoginFlow::MfaChallenge {
                code,
                recovery_code,
                use_recovery,
                error,
            } => {
                assert!(code.is_empty());
                assert!(recovery_code.is_empty());
                assert!(use_recovery);
                assert_eq!(error.as_deref(), Some(INVALID_CODE_MESSAGE));
            }
            other => panic!("expected challenge, got {other:?}"),
        }
    }

    #[test]
    fn rejection_during_challenge_returns_to_credentials() {
        let mut flow = LoginFlow::initial().resolve_attempt(LoginOutcome::MfaRequired);
        flow.set_active_code("123456".to_string());

        let outcome = classify_login_error(&http(401, "Incorrect credentials"));
        let flow = flow.resolve_attempt(outcome);

        assert_eq!(
            flow,
            LoginFlow::Credentials {
                error: Some(REJECTED_MESSAGE.to_string()),
            }
        );
    }

    #[test]
    fn toggling_code_kind_drops_typed_codes() {
        let mut flow = LoginFlow::initial().resolve_attempt(LoginOutcome::MfaRequired);
        flow.set_active_code("123456".to_string());

        let flow = flow.toggle_code_kind();
        match &flow {
            LoginFlow::MfaChallenge {
                code,
                recovery_code,
                use_recovery,
                ..
            } => {
                assert!(use_recovery);
                assert!(code.is_empty());
                assert!(recovery_code.is_empty());
            }
            other => panic!("expected challenge, got {other:?}"),
        }
    }

    #[test]
    fn only_the_active_code_kind_is_submitted() {
        let flow = LoginFlow::MfaChallenge {
            code: "123456".to_string(),
            recovery_code: "abcd-1234".to_string(),
            use_recovery: false,
            error: None,
        };
        let request = flow.attempt_request("a@b.c", "pw");
        assert_eq!(request.mfa_code.as_deref(), Some("123456"));
        assert_eq!(request.recovery_code, None);

        let flow = LoginFlow::MfaChallenge {
            code: "123456".to_string(),
            recovery_code: "abcd-1234".to_string(),
            use_recovery: true,
            error: None,
        };
        let request = flow.attempt_request("a@b.c", "pw");
        assert_eq!(request.mfa_code, None);
        assert_eq!(request.recovery_code.as_deref(), Some("abcd-1234"));
    }

    #[test]
    fn enrollment_prompt_gates_skip_on_remaining_count() {
        let flow = LoginFlow::initial().resolve_attempt(LoginOutcome::Success {
            enrollment_required: true,
            remaining_skips: 2,
        });
        assert!(flow.can_skip());

        let flow = LoginFlow::initial().resolve_attempt(LoginOutcome::Success {
            enrollment_required: true,
            remaining_skips: 0,
        });
        assert!(!flow.can_skip());
    }

    #[test]
    fn enrollment_walks_setup_verify_and_code_display() {
        let flow = LoginFlow::EnrollmentPrompt {
            remaining_skips: 1,
            error: None,
        };
        let mut flow = flow.begin_enrollment(MfaEnrollResponse {
            secret: "JBSWY3DPEHPK3PXP".to_string(),
            otpauth_url: "otpauth://totp/Compass:handler@example.com".to_string(),
        });
        assert!(!flow.can_verify_enrollment());

        flow.set_enrollment_code("654321".to_string());
        assert!(flow.can_verify_enrollment());

        let flow = flow.verify_failed(&http(400, "Invalid code"));
        match &flow {
            LoginFlow::EnrollmentSetup { code, error, .. } => {
                assert!(code.is_empty());
                assert_eq!(error.as_deref(), Some(INVALID_CODE_MESSAGE));
            }
            other => panic!("expected setup, got {other:?}"),
        }

        let flow = flow.verify_succeeded(vec!["1111-aaaa".to_string(), "2222-bbbb".to_string()]);
        assert!(matches!(flow, LoginFlow::RecoveryCodes { ref codes } if codes.len() == 2));

        assert_eq!(flow.finish(), LoginFlow::Authenticated);
    }

    #[test]
    fn classification_covers_the_error_taxonomy() {
        assert_eq!(
            classify_login_error(&http(401, "Invalid MFA code")),
            LoginOutcome::InvalidCode
        );
        assert_eq!(
            classify_login_error(&http(401, "Invalid code")),
            LoginOutcome::InvalidCode
        );
        assert_eq!(
            classify_login_error(&http(401, "Incorrect credentials")),
            LoginOutcome::Rejected(REJECTED_MESSAGE.to_string())
        );
        assert_eq!(
            classify_login_error(&http(500, "boom")),
            LoginOutcome::Rejected("Request failed (500): boom".to_string())
        );

        let timeout = AppError::Timeout("Request timed out. Please try again.".to_string());
        assert_eq!(
            classify_login_error(&timeout),
            LoginOutcome::Rejected(timeout.to_string())
        );
    }

    #[test]
    fn skip_failure_stays_on_prompt_with_detail() {
        let flow = LoginFlow::EnrollmentPrompt {
            remaining_skips: 0,
            error: None,
        };
        let flow = flow.enrollment_failed(surface_message(&http(400, "MFA enrollment required")));

        match flow {
            LoginFlow::EnrollmentPrompt {
                remaining_skips,
                error,
            } => {
                assert_eq!(remaining_skips, 0);
                assert_eq!(error.as_deref(), Some("MFA enrollment required"));
            }
            other => panic!("expected prompt, got {other:?}"),
        }
    }

    #[test]
    fn step_and_accessors_follow_the_active_state() {
        let flow = LoginFlow::initial();
        assert_eq!(flow.step(), FlowStep::Credentials);
        assert_eq!(flow.error(), None);
        assert_eq!(flow.remaining_skips(), 0);

        let flow = flow.resolve_attempt(LoginOutcome::MfaRequired);
        assert_eq!(flow.step(), FlowStep::Challenge);
        assert!(!flow.uses_recovery());

        let mut flow = flow.toggle_code_kind();
        assert!(flow.uses_recovery());
        flow.set_active_code("alpha-bravo".to_string());
        assert_eq!(flow.active_code(), "alpha-bravo");

        let flow = flow.resolve_attempt(LoginOutcome::Success {
            enrollment_required: true,
            remaining_skips: 2,
        });
        assert_eq!(flow.step(), FlowStep::EnrollmentPrompt);
        assert_eq!(flow.remaining_skips(), 2);
        assert_eq!(flow.active_code(), "");
    }
}
