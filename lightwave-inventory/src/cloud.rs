//! Cloud-resolved device inventory.
//!
//! Walks the LightwaveRF account API: authenticate with email and pin,
//! exchange the application key for a token, then fetch the nested user
//! profile and flatten its first estate/location/zone into descriptors.

use serde::Deserialize;

use crate::device::{DeviceDescriptor, DeviceType};
use crate::error::{InventoryError, Result};

/// Production account API endpoint.
pub const DEFAULT_HOST: &str = "https://control-api.lightwaverf.com";

/// Credentials and endpoint for the cloud topology API.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// API base URL; overridable for testing
    pub host: String,
    pub email: String,
    pub pin: String,
}

impl CloudConfig {
    /// Configuration against the production endpoint.
    pub fn new(email: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            email: email.into(),
            pin: pin.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    application_key: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    estates: Vec<Estate>,
}

#[derive(Debug, Deserialize)]
struct Estate {
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    zones: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    rooms: Vec<Room>,
}

#[derive(Debug, Deserialize)]
struct Room {
    room_number: u32,
    name: String,
    devices: Vec<CloudDevice>,
}

#[derive(Debug, Deserialize)]
struct CloudDevice {
    device_number: u32,
    name: String,
    device_type_id: u8,
}

/// Fetch the device inventory from the cloud account API.
pub async fn fetch_devices(config: &CloudConfig) -> Result<Vec<DeviceDescriptor>> {
    let client = reqwest::Client::new();

    tracing::debug!(host = %config.host, "Fetching rooms from the account API");

    let user: UserResponse = client
        .get(format!("{}/v1/user", config.host))
        .query(&[("password", &config.pin), ("username", &config.email)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let auth: AuthResponse = client
        .get(format!("{}/v1/auth", config.host))
        .query(&[("application_key", &user.application_key)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let profile: UserProfile = client
        .get(format!("{}/v1/user_profile", config.host))
        .query(&[("nested", "1")])
        .header("X-LWRF-token", &auth.token)
        .header("X-LWRF-platform", "ios")
        .header("X-LWRF-skin", "lightwaverf")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    collect_devices(profile)
}

/// Flatten the first estate/location/zone of a profile into descriptors.
fn collect_devices(profile: UserProfile) -> Result<Vec<DeviceDescriptor>> {
    let zone = profile
        .estates
        .into_iter()
        .next()
        .and_then(|estate| estate.locations.into_iter().next())
        .and_then(|location| location.zones.into_iter().next())
        .ok_or_else(|| {
            InventoryError::EmptyTopology("no estate/location/zone in profile".to_string())
        })?;

    let mut descriptors = Vec::new();
    for room in zone.rooms {
        tracing::debug!(room = %room.name, devices = room.devices.len(), "Walking cloud room");

        for device in room.devices {
            let Some(device_type) = DeviceType::from_cloud_id(device.device_type_id) else {
                tracing::debug!(
                    device = %device.name,
                    type_id = device.device_type_id,
                    "Skipping device with unknown cloud type id"
                );
                continue;
            };

            descriptors.push(DeviceDescriptor {
                room_id: room.room_number,
                room_name: room.name.clone(),
                device_id: device.device_number,
                device_name: device.name,
                device_type,
            });
        }
    }
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn profile_body() -> &'static str {
        r#"{
            "estates": [{
                "locations": [{
                    "zones": [{
                        "rooms": [
                            {
                                "room_number": 1,
                                "name": "Lounge",
                                "devices": [
                                    {"device_number": 1, "name": "Ceiling", "device_type_id": 2},
                                    {"device_number": 2, "name": "Socket", "device_type_id": 1},
                                    {"device_number": 3, "name": "Sensor", "device_type_id": 7}
                                ]
                            },
                            {
                                "room_number": 4,
                                "name": "Bedroom",
                                "devices": [
                                    {"device_number": 1, "name": "Blinds", "device_type_id": 3}
                                ]
                            }
                        ]
                    }]
                }]
            }]
        }"#
    }

    #[tokio::test]
    async fn fetches_and_flattens_the_cloud_topology() {
        let mut server = mockito::Server::new_async().await;

        let user_mock = server
            .mock("GET", "/v1/user")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "user@example.com".into()),
                Matcher::UrlEncoded("password".into(), "1234".into()),
            ]))
            .with_body(r#"{"application_key": "app-key"}"#)
            .create_async()
            .await;

        let auth_mock = server
            .mock("GET", "/v1/auth")
            .match_query(Matcher::UrlEncoded("application_key".into(), "app-key".into()))
            .with_body(r#"{"token": "tok-1"}"#)
            .create_async()
            .await;

        let profile_mock = server
            .mock("GET", "/v1/user_profile")
            .match_query(Matcher::UrlEncoded("nested".into(), "1".into()))
            .match_header("X-LWRF-token", "tok-1")
            .match_header("X-LWRF-platform", "ios")
            .with_body(profile_body())
            .create_async()
            .await;

        let config = CloudConfig {
            host: server.url(),
            email: "user@example.com".to_string(),
            pin: "1234".to_string(),
        };
        let devices = fetch_devices(&config).await.unwrap();

        user_mock.assert_async().await;
        auth_mock.assert_async().await;
        profile_mock.assert_async().await;

        // The unknown type id 7 is skipped
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].device_type, DeviceType::Dimmer);
        assert_eq!(devices[1].device_type, DeviceType::Switch);
        assert_eq!(devices[2].room_id, 4);
        assert_eq!(devices[2].device_type, DeviceType::OpenClose);
    }

    #[tokio::test]
    async fn failed_authentication_is_an_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/user")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let config = CloudConfig {
            host: server.url(),
            email: "user@example.com".to_string(),
            pin: "wrong".to_string(),
        };
        assert!(matches!(
            fetch_devices(&config).await,
            Err(InventoryError::Http(_))
        ));
    }

    #[test]
    fn empty_profile_is_an_empty_topology_error() {
        let profile = UserProfile { estates: Vec::new() };
        assert!(matches!(
            collect_devices(profile),
            Err(InventoryError::EmptyTopology(_))
        ));
    }
}
