use medly_domain::{DispatchReport, DispatchResult};
use serde::{Deserialize, Serialize};

pub mod run_dispatch {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        /// Number of attempted sends, successful or not
        pub total_sent: usize,
        /// False when the run hit its deadline and the results are partial
        pub completed: bool,
        pub results: Vec<DispatchResult>,
    }

    impl APIResponse {
        pub fn new(report: DispatchReport) -> Self {
            Self {
                success: true,
                total_sent: report.total_sent(),
                completed: report.completed,
                results: report.results,
            }
        }
    }

    /// Envelope for a run that could not read its bulk sources at all
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ErrorResponse {
        pub success: bool,
        pub error: String,
    }

    impl ErrorResponse {
        pub fn new(error: String) -> Self {
            Self {
                success: false,
                error,
            }
        }
    }
}
