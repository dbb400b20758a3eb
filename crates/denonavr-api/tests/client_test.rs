// Integration tests for `AvrClient` using wiremock.
#![allow(clippy::unwrap_used)]

use wiremock::matchers::{method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use denonavr_api::{ApiError, AvrClient};

const DEVICE_INFO_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Device_Info>
  <ModelName>AVR-X1600H</ModelName>
  <SerialNumber>ADN1234567890</SerialNumber>
  <MacAddress>0005CD123456</MacAddress>
</Device_Info>"#;

const ZONE_STATUS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<item>
  <Power><value>ON</value></Power>
  <InputFuncSelect><value>Game</value></InputFuncSelect>
  <MasterVolume><value>-45.5</value></MasterVolume>
  <Mute><value>off</value></Mute>
  <SurrMode><value>MCH STEREO</value></SurrMode>
  <InputFuncList>
    <value>AUX</value>
    <value>Game</value>
    <value>TV Audio</value>
  </InputFuncList>
  <SurrModeList>
    <value>DIRECT</value>
    <value>MCH STEREO</value>
    <value>MOVIE</value>
    <value>MUSIC</value>
  </SurrModeList>
</item>"#;

async fn setup() -> (MockServer, AvrClient) {
    let server = MockServer::start().await;
    let base = server.uri().parse().unwrap();
    let client = AvrClient::with_base("mocked-host", base);
    (server, client)
}

#[tokio::test]
async fn setup_captures_device_info() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/Deviceinfo.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DEVICE_INFO_XML))
        .expect(1)
        .mount(&server)
        .await;

    client.setup().await.unwrap();
    let info = client.info().unwrap();
    assert_eq!(info.model_name, "AVR-X1600H");
    assert_eq!(info.serial_number.as_deref(), Some("ADN1234567890"));
}

#[tokio::test]
async fn update_replaces_the_whole_snapshot() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/formMainZone_MainZoneXmlStatus.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ZONE_STATUS_XML))
        .mount(&server)
        .await;

    let status = client.update().await.unwrap();
    assert_eq!(status.power, "ON");
    assert_eq!(status.input_func, "Game");
    assert_eq!(status.volume, -45.5);
    assert_eq!(status.input_func_list, vec!["AUX", "Game", "TV Audio"]);
    assert_eq!(
        status.sound_mode_list,
        vec!["DIRECT", "MCH STEREO", "MOVIE", "MUSIC"]
    );

    assert!(client.status().is_some());
}

#[tokio::test]
async fn commands_hit_the_direct_endpoint() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/formiPhoneAppDirect.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(4)
        .mount(&server)
        .await;

    client.power_on().await.unwrap();
    client.set_mute(true).await.unwrap();
    client.set_volume(-40.0).await.unwrap();
    client.set_sound_mode("MOVIE").await.unwrap();

    let queries: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|req: &Request| req.url.query().map(str::to_string))
        .collect();
    assert_eq!(queries, vec!["PWON", "MUON", "MV40", "MSMOVIE"]);
}

#[tokio::test]
async fn status_fetch_takes_no_query() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/formMainZone_MainZoneXmlStatus.xml"))
        .and(query_param_is_missing("PWON"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ZONE_STATUS_XML))
        .mount(&server)
        .await;

    client.update().await.unwrap();
}

#[tokio::test]
async fn http_error_status_is_a_protocol_error() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/formMainZone_MainZoneXmlStatus.xml"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.update().await.unwrap_err();
    assert!(matches!(err, ApiError::Protocol { .. }));
    assert!(!err.is_network());
}

#[tokio::test]
async fn unreachable_receiver_is_a_network_error() {
    // Nothing listens on this port.
    let base = "http://127.0.0.1:9".parse().unwrap();
    let mut client = AvrClient::with_base("unreachable-host", base);

    let err = client.setup().await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn garbled_status_is_a_protocol_error() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/goform/formMainZone_MainZoneXmlStatus.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not xml at all"))
        .mount(&server)
        .await;

    let err = client.update().await.unwrap_err();
    assert!(matches!(err, ApiError::Protocol { .. }));
}
