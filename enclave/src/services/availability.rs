/* -------------------------------------------------------------------------- *\
 *                |   █████╗ ██╗   ██╗██████╗  █████╗ ███████╗ |              *
 *                |  ██╔══██╗██║   ██║██╔══██╗██╔══██╗██╔════╝ |              *
 *                |  ███████║██║   ██║██████╔╝███████║█████╗   |              *
 *                |  ██╔══██║██║   ██║██╔══██╗██╔══██║██╔══╝   |              *
 *                |  ██║  ██║╚██████╔╝██║  ██║██║  ██║███████╗ |              *
 *                |  ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝ |              *
 *                +--------------------------------------------+              *
 *                                                                            *
 *                         Distributed Systems Runtime                        *
 * -------------------------------------------------------------------------- *
 * Copyright 2022 - 2024, the aurae contributors                              *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::ServiceId;
use proto::api_container::{
    WaitForHttpGetEndpointAvailabilityArgs,
    WaitForHttpPostEndpointAvailabilityArgs,
};
use std::time::Duration;

/// How to poll a service's HTTP endpoint until it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEndpointCheck {
    pub port: u16,
    pub path: String,
    pub initial_delay: Duration,
    pub retries: u32,
    pub retries_delay: Duration,
    /// When non-empty, the response body must equal this text.
    pub body_text: String,
}

impl HttpEndpointCheck {
    pub fn new(port: u16, path: impl Into<String>) -> Self {
        Self {
            port,
            path: path.into(),
            initial_delay: Duration::ZERO,
            retries: 1,
            retries_delay: Duration::ZERO,
            body_text: String::new(),
        }
    }

    pub(crate) fn to_get_args(
        &self,
        service_id: &ServiceId,
    ) -> WaitForHttpGetEndpointAvailabilityArgs {
        WaitForHttpGetEndpointAvailabilityArgs {
            service_id: service_id.to_string(),
            port: u32::from(self.port),
            path: self.path.clone(),
            initial_delay_milliseconds: millis(self.initial_delay),
            retries: self.retries,
            retries_delay_milliseconds: millis(self.retries_delay),
            body_text: self.body_text.clone(),
        }
    }

    pub(crate) fn to_post_args(
        &self,
        service_id: &ServiceId,
        request_body: &str,
    ) -> WaitForHttpPostEndpointAvailabilityArgs {
        WaitForHttpPostEndpointAvailabilityArgs {
            service_id: service_id.to_string(),
            port: u32::from(self.port),
            path: self.path.clone(),
            request_body: request_body.to_string(),
            initial_delay_milliseconds: millis(self.initial_delay),
            retries: self.retries,
            retries_delay_milliseconds: millis(self.retries_delay),
            body_text: self.body_text.clone(),
        }
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_delays_to_milliseconds() {
        let check = HttpEndpointCheck {
            initial_delay: Duration::from_secs(2),
            retries: 5,
            retries_delay: Duration::from_millis(250),
            body_text: "ok".to_string(),
            ..HttpEndpointCheck::new(8080, "/health")
        };

        let args = check.to_post_args(&"api".into(), "{}");

        assert_eq!(
            args,
            WaitForHttpPostEndpointAvailabilityArgs {
                service_id: "api".to_string(),
                port: 8080,
                path: "/health".to_string(),
                request_body: "{}".to_string(),
                initial_delay_milliseconds: 2000,
                retries: 5,
                retries_delay_milliseconds: 250,
                body_text: "ok".to_string(),
            }
        );
    }

    #[test]
    fn saturates_oversized_delays() {
        let check = HttpEndpointCheck {
            initial_delay: Duration::from_secs(u64::MAX),
            ..HttpEndpointCheck::new(80, "/")
        };
        assert_eq!(
            check.to_get_args(&"api".into()).initial_delay_milliseconds,
            u32::MAX
        );
    }
}
