use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::error::GeolocationError;
use crate::model::{GeolocationRequestOptions, LocationFix};
use crate::position::geocode::ReverseGeocoder;
use crate::position::sensor::PositionSensor;
use crate::position::PositionService;

/// Lifecycle of one working day: `NotCheckedIn -> CheckedIn -> CheckedOut`.
/// No transition skips a state and `CheckedOut` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SessionState {
    NotCheckedIn,
    CheckedIn,
    CheckedOut,
}

/// Outcome of the external check-in/out call.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Transport-level failure reaching the check-in/out backend.
#[derive(Debug, Clone, Error)]
#[error("{}", message.as_deref().unwrap_or("network error"))]
pub struct CheckApiError {
    pub message: Option<String>,
}

/// The external attendance backend. Implementations own transport.
#[allow(async_fn_in_trait)]
pub trait CheckApi {
    async fn check_in(
        &self,
        employee_id: u64,
        fix: &LocationFix,
    ) -> Result<CheckResponse, CheckApiError>;

    async fn check_out(
        &self,
        employee_id: u64,
        fix: &LocationFix,
    ) -> Result<CheckResponse, CheckApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("cannot {attempted} from state {from}")]
    InvalidTransition {
        from: SessionState,
        attempted: &'static str,
    },

    /// The backend answered but refused the transition.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("{0}")]
    Api(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

/// One employee's attendance session. Any failure along the way leaves the
/// state exactly where it was, so a clean retry is always possible.
/// Taking `&mut self` keeps attempts serialized per session.
#[derive(Debug)]
pub struct AttendanceSession {
    id: Uuid,
    employee_id: u64,
    state: SessionState,
    check_in_fix: Option<LocationFix>,
    check_out_fix: Option<LocationFix>,
}

impl AttendanceSession {
    pub fn new(employee_id: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            state: SessionState::NotCheckedIn,
            check_in_fix: None,
            check_out_fix: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn employee_id(&self) -> u64 {
        self.employee_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn check_in_fix(&self) -> Option<&LocationFix> {
        self.check_in_fix.as_ref()
    }

    pub fn check_out_fix(&self) -> Option<&LocationFix> {
        self.check_out_fix.as_ref()
    }

    pub async fn check_in<S, G, A>(
        &mut self,
        positions: &PositionService<S, G>,
        api: &A,
        options: &GeolocationRequestOptions,
    ) -> Result<&LocationFix, SessionError>
    where
        S: PositionSensor,
        G: ReverseGeocoder,
        A: CheckApi,
    {
        if self.state != SessionState::NotCheckedIn {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                attempted: "check in",
            });
        }

        let fix = positions.acquire_fix_with_address(options).await?;
        let response = api
            .check_in(self.employee_id, &fix)
            .await
            .map_err(|e| SessionError::Api(e.to_string()))?;

        if !response.success {
            return Err(SessionError::Rejected(
                response.message.unwrap_or_else(|| "network error".to_string()),
            ));
        }

        self.state = SessionState::CheckedIn;
        info!(employee_id = self.employee_id, session = %self.id, "Checked in");
        Ok(&*self.check_in_fix.insert(fix))
    }

    pub async fn check_out<S, G, A>(
        &mut self,
        positions: &PositionService<S, G>,
        api: &A,
        options: &GeolocationRequestOptions,
    ) -> Result<&LocationFix, SessionError>
    where
        S: PositionSensor,
        G: ReverseGeocoder,
        A: CheckApi,
    {
        if self.state != SessionState::CheckedIn {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                attempted: "check out",
            });
        }

        let fix = positions.acquire_fix_with_address(options).await?;
        let response = api
            .check_out(self.employee_id, &fix)
            .await
            .map_err(|e| SessionError::Api(e.to_string()))?;

        if !response.success {
            return Err(SessionError::Rejected(
                response.message.unwrap_or_else(|| "network error".to_string()),
            ));
        }

        self.state = SessionState::CheckedOut;
        info!(employee_id = self.employee_id, session = %self.id, "Checked out");
        Ok(&*self.check_out_fix.insert(fix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::geocode::GeocodeError;
    use crate::position::sensor::{FixedPositionSensor, RawPosition, SensorError};

    struct NullGeocoder;

    impl ReverseGeocoder for NullGeocoder {
        async fn display_name(&self, _lat: f64, _lon: f64) -> Result<String, GeocodeError> {
            Err(GeocodeError::MissingDisplayName)
        }
    }

    struct DeniedSensor;

    impl PositionSensor for DeniedSensor {
        async fn current_position(
            &self,
            _options: &GeolocationRequestOptions,
        ) -> Result<RawPosition, SensorError> {
            Err(SensorError::PermissionDenied)
        }
    }

    struct StubApi {
        success: bool,
        message: Option<String>,
        reachable: bool,
    }

    impl StubApi {
        fn accepting() -> Self {
            Self {
                success: true,
                message: None,
                reachable: true,
            }
        }
    }

    impl CheckApi for StubApi {
        async fn check_in(
            &self,
            _employee_id: u64,
            _fix: &LocationFix,
        ) -> Result<CheckResponse, CheckApiError> {
            if !self.reachable {
                return Err(CheckApiError {
                    message: self.message.clone(),
                });
            }
            Ok(CheckResponse {
                success: self.success,
                message: self.message.clone(),
            })
        }

        async fn check_out(
            &self,
            employee_id: u64,
            fix: &LocationFix,
        ) -> Result<CheckResponse, CheckApiError> {
            self.check_in(employee_id, fix).await
        }
    }

    fn positions() -> PositionService<FixedPositionSensor, NullGeocoder> {
        PositionService::new(
            FixedPositionSensor::new(12.9, 77.6, Some(10.0)),
            NullGeocoder,
        )
    }

    fn options() -> GeolocationRequestOptions {
        GeolocationRequestOptions::default()
    }

    #[tokio::test]
    async fn full_day_walks_through_all_states() {
        let svc = positions();
        let api = StubApi::accepting();
        let mut session = AttendanceSession::new(1001);

        assert_eq!(session.state(), SessionState::NotCheckedIn);
        session.check_in(&svc, &api, &options()).await.unwrap();
        assert_eq!(session.state(), SessionState::CheckedIn);
        session.check_out(&svc, &api, &options()).await.unwrap();
        assert_eq!(session.state(), SessionState::CheckedOut);
        assert!(session.check_in_fix().is_some());
        assert!(session.check_out_fix().is_some());
    }

    #[tokio::test]
    async fn check_out_cannot_skip_check_in() {
        let svc = positions();
        let api = StubApi::accepting();
        let mut session = AttendanceSession::new(1001);

        let err = session.check_out(&svc, &api, &options()).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(session.state(), SessionState::NotCheckedIn);
    }

    #[tokio::test]
    async fn checked_out_is_terminal() {
        let svc = positions();
        let api = StubApi::accepting();
        let mut session = AttendanceSession::new(1001);
        session.check_in(&svc, &api, &options()).await.unwrap();
        session.check_out(&svc, &api, &options()).await.unwrap();

        let err = session.check_in(&svc, &api, &options()).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(session.state(), SessionState::CheckedOut);
    }

    #[tokio::test]
    async fn failed_fix_leaves_state_unchanged() {
        let svc = PositionService::new(DeniedSensor, NullGeocoder);
        let api = StubApi::accepting();
        let mut session = AttendanceSession::new(1001);

        let err = session.check_in(&svc, &api, &options()).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Geolocation(GeolocationError::PermissionDenied)
        ));
        assert_eq!(session.state(), SessionState::NotCheckedIn);
        assert!(session.check_in_fix().is_none());
    }

    #[tokio::test]
    async fn rejected_check_in_surfaces_server_message() {
        let svc = positions();
        let api = StubApi {
            success: false,
            message: Some("Already checked in today".to_string()),
            reachable: true,
        };
        let mut session = AttendanceSession::new(1001);

        let err = session.check_in(&svc, &api, &options()).await.unwrap_err();
        assert!(matches!(err, SessionError::Rejected(ref m) if m == "Already checked in today"));
        assert_eq!(session.state(), SessionState::NotCheckedIn);
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_network_error() {
        let svc = positions();
        let api = StubApi {
            success: false,
            message: None,
            reachable: false,
        };
        let mut session = AttendanceSession::new(1001);

        let err = session.check_in(&svc, &api, &options()).await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ref m) if m == "network error"));
        assert_eq!(session.state(), SessionState::NotCheckedIn);
    }
}
