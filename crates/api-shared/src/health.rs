use crate::messages::HealthRes;

/// Simple health service used by the REST API and the run binary.
///
/// This service provides a standardised way to check the health status of the service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Swasthya is alive".into(),
        }
    }
}
