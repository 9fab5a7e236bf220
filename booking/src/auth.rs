//! Auth feature: client-side session state over the auth endpoints.
//!
//! Sessions themselves (cookies, tokens, password checks) are owned by the
//! server; this slice only tracks who is signed in and the login/register
//! lifecycles. Registration with mismatched passwords is rejected locally,
//! before any request is issued.

use crate::env::AppEnvironment;
use crate::types::{AuthenticatedUser, Credentials, Registration};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::reducer::Reducer;

/// State of the auth feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// The signed-in user, if any.
    pub user: Option<AuthenticatedUser>,
    /// Whether an auth request is in flight.
    pub is_loading: bool,
    /// Whether the last operation succeeded.
    pub is_success: bool,
    /// Whether the last operation failed.
    pub is_error: bool,
    /// Last surfaced message.
    pub message: String,
}

/// Actions processed by the auth reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuthAction {
    /// Sign in.
    Login(Credentials),
    /// Result of the login call.
    LoginResolved(Result<Box<AuthenticatedUser>, String>),
    /// Create an account; mismatched passwords never reach the network.
    Register(Registration),
    /// Result of the registration call.
    RegisterResolved(Result<(), String>),
    /// Sign out. The server call is best-effort: its failure is logged and
    /// the local session is cleared regardless.
    Logout,
    /// The local session was cleared.
    LoggedOut,
    /// Reset the success/error flags after they have been shown.
    ClearFlags,
}

/// Reducer for the auth feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl AuthReducer {
    /// Create a new auth reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AuthAction::Login(credentials) => {
                state.is_loading = true;
                state.is_error = false;
                state.message.clear();
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = api
                        .login(credentials)
                        .await
                        .map(Box::new)
                        .map_err(|e| e.to_string());
                    Some(AuthAction::LoginResolved(result))
                })]
            },

            AuthAction::LoginResolved(Ok(user)) => {
                state.is_loading = false;
                state.is_success = true;
                state.user = Some(*user);
                smallvec![Effect::None]
            },

            AuthAction::LoginResolved(Err(message)) => {
                tracing::warn!(%message, "login failed");
                state.is_loading = false;
                state.is_error = true;
                state.message = message;
                state.user = None;
                smallvec![Effect::None]
            },

            AuthAction::Register(registration) => {
                if !registration.passwords_match() {
                    state.is_error = true;
                    state.message = "Passwords do not match".to_string();
                    return smallvec![Effect::None];
                }
                state.is_loading = true;
                state.is_error = false;
                state.message.clear();
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = api.register(registration).await.map_err(|e| e.to_string());
                    Some(AuthAction::RegisterResolved(result))
                })]
            },

            AuthAction::RegisterResolved(Ok(())) => {
                state.is_loading = false;
                state.is_success = true;
                // Registration does not sign the user in.
                state.user = None;
                smallvec![Effect::None]
            },

            AuthAction::RegisterResolved(Err(message)) => {
                tracing::warn!(%message, "registration failed");
                state.is_loading = false;
                state.is_error = true;
                state.message = message;
                state.user = None;
                smallvec![Effect::None]
            },

            AuthAction::Logout => {
                let api = env.api();
                smallvec![Effect::future(async move {
                    if let Err(e) = api.logout().await {
                        tracing::warn!(error = %e, "logout call failed; clearing session anyway");
                    }
                    Some(AuthAction::LoggedOut)
                })]
            },

            AuthAction::LoggedOut => {
                state.user = None;
                smallvec![Effect::None]
            },

            AuthAction::ClearFlags => {
                state.is_loading = false;
                state.is_success = false;
                state.is_error = false;
                state.message.clear();
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::api::mock::MockHotelApi;
    use crate::types::UserId;
    use stayflow_testing::reducer_test::assertions::{assert_has_future, assert_no_effects};
    use stayflow_testing::test_clock;
    use std::sync::Arc;

    fn test_env() -> AppEnvironment {
        AppEnvironment::new(Arc::new(test_clock()), Arc::new(MockHotelApi::new()))
    }

    fn dispatch(state: &mut AuthState, action: AuthAction) -> Effects<AuthAction> {
        AuthReducer::new().reduce(state, action, &test_env())
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1),
            username: "somsak".to_string(),
            email: "somsak@example.com".to_string(),
            role: "guest".to_string(),
        }
    }

    #[test]
    fn mismatched_passwords_are_rejected_without_any_effect() {
        let mut state = AuthState::default();

        let effects = dispatch(
            &mut state,
            AuthAction::Register(Registration {
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "one".to_string(),
                confirm_password: "two".to_string(),
            }),
        );

        assert_no_effects(&effects);
        assert!(state.is_error);
        assert_eq!(state.message, "Passwords do not match");
        assert!(!state.is_loading);
    }

    #[test]
    fn matching_passwords_reach_the_network() {
        let mut state = AuthState::default();

        let effects = dispatch(
            &mut state,
            AuthAction::Register(Registration {
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "same".to_string(),
                confirm_password: "same".to_string(),
            }),
        );

        assert_has_future(&effects);
        assert!(state.is_loading);
    }

    #[test]
    fn successful_registration_leaves_the_user_signed_out() {
        let mut state = AuthState::default();
        dispatch(&mut state, AuthAction::RegisterResolved(Ok(())));

        assert!(state.is_success);
        assert!(state.user.is_none());
    }

    #[test]
    fn login_resolution_stores_or_clears_the_user() {
        let mut state = AuthState::default();

        dispatch(
            &mut state,
            AuthAction::LoginResolved(Ok(Box::new(user()))),
        );
        assert_eq!(state.user.as_ref().map(|u| u.id), Some(UserId::new(1)));
        assert!(state.is_success);

        dispatch(
            &mut state,
            AuthAction::LoginResolved(Err("invalid credentials".to_string())),
        );
        assert!(state.user.is_none());
        assert!(state.is_error);
        assert_eq!(state.message, "invalid credentials");
    }

    #[test]
    fn logged_out_clears_the_session() {
        let mut state = AuthState {
            user: Some(user()),
            ..AuthState::default()
        };

        dispatch(&mut state, AuthAction::LoggedOut);

        assert!(state.user.is_none());
    }
}
