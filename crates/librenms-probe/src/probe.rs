//! Device probe
//!
//! Checks connectivity, resolves one device and gathers what the report prints.

use crate::error::ProbeError;
use librenms_client::{Device, DeviceRef, LibreNmsClientTrait, Port};
use serde::Serialize;
use tracing::{info, warn};

/// What to probe, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeArgs {
    pub device: DeviceRef,
    pub with_ports: bool,
}

impl ProbeArgs {
    /// Parse `<hostname|device_id> [--ports]`
    ///
    /// A purely numeric target is taken as a device id.
    pub fn parse<I, S>(args: I) -> Result<Self, ProbeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut target = None;
        let mut with_ports = false;

        for arg in args.into_iter().map(Into::into) {
            match arg.as_str() {
                "--ports" => with_ports = true,
                flag if flag.starts_with("--") => {
                    return Err(ProbeError::Usage(format!("unknown option {flag}")));
                }
                _ if target.is_some() => {
                    return Err(ProbeError::Usage(format!("unexpected argument {arg}")));
                }
                _ => target = Some(arg),
            }
        }

        let target = target.ok_or_else(|| ProbeError::Usage("missing device".to_string()))?;
        let device = match target.parse::<u64>() {
            Ok(id) => DeviceRef::Id(id),
            Err(_) => DeviceRef::Hostname(target),
        };

        Ok(Self { device, with_ports })
    }
}

/// Probe output
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub librenms_version: Option<String>,
    pub device: Device,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<Port>>,
}

/// Validate the token, resolve the device and optionally list its ports
pub async fn run<C: LibreNmsClientTrait + ?Sized>(
    client: &C,
    args: &ProbeArgs,
) -> Result<ProbeReport, ProbeError> {
    client.validate_token().await?;

    let librenms_version = match client.system_info().await {
        Ok(info) => info.and_then(|i| i.local_ver),
        Err(e) => {
            warn!("Could not read LibreNMS version: {}", e);
            None
        }
    };
    info!(
        "Connected to {} (LibreNMS {})",
        client.base_url(),
        librenms_version.as_deref().unwrap_or("unknown")
    );

    let device = client.resolve_device(args.device.clone()).await?;
    info!("Resolved {} to device {}", args.device, device.device_id);

    let ports = if args.with_ports {
        Some(
            client
                .device_ports(DeviceRef::Id(device.device_id), None)
                .await?
                .unwrap_or_default(),
        )
    } else {
        None
    };

    Ok(ProbeReport {
        librenms_version,
        device,
        ports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use librenms_client::LibreNmsError;
    use librenms_client::MockLibreNmsClient;
    use librenms_client::mock::helpers;

    fn mock() -> MockLibreNmsClient {
        let client = MockLibreNmsClient::new("http://librenms.test/api/v0");
        client.insert_device(helpers::device(42, "sw1"));
        client.insert_port(helpers::port(100, 42, "eth0"));
        client
    }

    #[test]
    fn test_parse_hostname_and_id() {
        let args = ProbeArgs::parse(["sw1"]).expect("hostname");
        assert_eq!(args.device, DeviceRef::Hostname("sw1".to_string()));
        assert!(!args.with_ports);

        let args = ProbeArgs::parse(["42", "--ports"]).expect("id");
        assert_eq!(args.device, DeviceRef::Id(42));
        assert!(args.with_ports);
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        assert!(matches!(ProbeArgs::parse(Vec::<String>::new()), Err(ProbeError::Usage(_))));
        assert!(matches!(ProbeArgs::parse(["sw1", "sw2"]), Err(ProbeError::Usage(_))));
        assert!(matches!(ProbeArgs::parse(["--verbose", "sw1"]), Err(ProbeError::Usage(_))));
    }

    #[tokio::test]
    async fn test_run_resolves_device_with_ports() {
        let client = mock();
        let args = ProbeArgs::parse(["sw1", "--ports"]).expect("args");

        let report = run(&client, &args).await.expect("probe");
        assert_eq!(report.device.device_id, 42);
        assert_eq!(report.ports.as_ref().map(Vec::len), Some(1));

        let rendered = serde_json::to_value(&report).expect("json");
        assert_eq!(rendered["device"]["hostname"], "sw1");
    }

    #[tokio::test]
    async fn test_run_unknown_device() {
        let client = mock();
        let args = ProbeArgs::parse(["ghost"]).expect("args");

        let err = run(&client, &args).await.expect_err("unknown");
        assert!(matches!(err, ProbeError::LibreNms(LibreNmsError::DeviceNotFound(_))));
        assert_eq!(err.exit_status(), 3);
    }

    #[tokio::test]
    async fn test_run_rejected_token() {
        let client = mock();
        client.reject_token(401);
        let args = ProbeArgs::parse(["sw1"]).expect("args");

        let err = run(&client, &args).await.expect_err("rejected");
        assert_eq!(err.exit_status(), 4);
    }
}
