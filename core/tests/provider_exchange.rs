use cdmcore::client::{Credentials, SpaceTrackClient};
use cdmcore::decode::{decode, decode_strict, DecodePolicy};
use cdmcore::model::{ObjectType, RadarCrossSection};
use cdmcore::query::QueryBuilder;
use cdmcore::{AlertError, CdmSource, Stage};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use warp::{http::StatusCode, Filter};

const UPCOMING: &str = r#"[{"CDM_ID":"1","CREATED":"2022-04-29 00:45:12.000000","EMERGENCY_REPORTABLE":"Y","TCA":"2022-04-29T22:03:26.595000","MIN_RNG":"4","PC":0.1663616,"SAT_1_ID":"22487","SAT_1_NAME":"COSMOS 2233","SAT1_OBJECT_TYPE":"PAYLOAD","SAT1_RCS":"LARGE","SAT_1_EXCL_VOL":"5.00","SAT_2_ID":"5758","SAT_2_NAME":"THORAD AGENA D DEB","SAT2_OBJECT_TYPE":"DEBRIS","SAT2_RCS":null,"SAT_2_EXCL_VOL":"5.00"}]"#;

/// Starts a fake provider that answers every login post with `status` and
/// `body`, forwarding the submitted form fields to the returned receiver.
fn spawn_provider(
    status: StatusCode,
    body: &'static str,
) -> (String, mpsc::Receiver<HashMap<String, String>>) {
    let (addr_tx, addr_rx) = mpsc::channel();
    let (form_tx, form_rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build runtime");
        runtime.block_on(async move {
            let login = warp::path!("ajaxauth" / "login")
                .and(warp::post())
                .and(warp::body::form())
                .map(move |form: HashMap<String, String>| {
                    let _ = form_tx.send(form);
                    warp::reply::with_status(body, status)
                });
            let (addr, server) = warp::serve(login).bind_ephemeral(([127, 0, 0, 1], 0));
            addr_tx.send(addr).expect("test dropped receiver");
            server.await;
        });
    });

    let addr = addr_rx.recv().expect("provider did not start");
    (format!("http://{}", addr), form_rx)
}

fn client_for(base_url: &str) -> (QueryBuilder, SpaceTrackClient) {
    let queries = QueryBuilder::new(base_url);
    let credentials = Credentials::new("operator@example.com", "s3cret pass&word").unwrap();
    let client =
        SpaceTrackClient::with_timeout(&queries, credentials, Duration::from_secs(5)).unwrap();
    (queries, client)
}

#[test]
fn login_post_carries_credentials_and_query() {
    let (base_url, forms) = spawn_provider(StatusCode::OK, "[]");
    let (queries, client) = client_for(&base_url);
    let now = Utc.with_ymd_and_hms(2022, 5, 19, 7, 20, 26).unwrap();
    let query = queries.cdm_after(now);

    let body = client.fetch(&query).unwrap();
    assert_eq!(body, b"[]");

    let form = forms.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(form["identity"], "operator@example.com");
    assert_eq!(form["password"], "s3cret pass&word");
    assert_eq!(form["query"], query);
    assert!(form["query"].contains("/TCA/%3E2022-05-19T07:20:26.000000/orderby/TCA%20asc/"));

    assert!(decode_strict(&body).unwrap().is_empty());
}

#[test]
fn upcoming_conjunction_decodes_end_to_end() {
    let (base_url, _forms) = spawn_provider(StatusCode::OK, UPCOMING);
    let (queries, client) = client_for(&base_url);

    let body = client.fetch(&queries.cdm_after(Utc::now())).unwrap();
    let outcome = decode(&body, DecodePolicy::Strict).unwrap();

    assert_eq!(outcome.received, 1);
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.cdm_id(), "1");
    assert!((record.probability_of_collision().unwrap() - 0.1663616).abs() < 1e-12);
    assert!(record.emergency_reportable());
    assert_eq!(record.min_range_meters(), 4);
    assert_eq!(record.primary().object_id(), 22487);
    assert_eq!(record.primary().object_name(), "COSMOS 2233");
    assert_eq!(record.primary().object_type(), ObjectType::Payload);
    assert_eq!(record.primary().radar_cross_section(), Some(RadarCrossSection::Large));
    assert_eq!(record.secondary().object_type(), ObjectType::Debris);
    assert_eq!(record.secondary().radar_cross_section(), None);
    assert_eq!(record.secondary().exclusion_volume_radius(), 5.0);
    assert!(record.time_of_closest_approach() > record.created_at());
}

#[test]
fn rejected_login_is_authentication_error() {
    let (base_url, _forms) = spawn_provider(StatusCode::UNAUTHORIZED, "Failed login");
    let (queries, client) = client_for(&base_url);

    let err = client.fetch(&queries.cdm_after(Utc::now())).unwrap_err();
    match &err {
        AlertError::AuthenticationOrQuery { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "Failed login");
        }
        other => panic!("expected provider rejection, got {:?}", other),
    }
    assert_eq!(err.stage(), Stage::Authentication);
}

#[test]
fn server_error_is_query_error() {
    let (base_url, _forms) = spawn_provider(StatusCode::INTERNAL_SERVER_ERROR, "");
    let (queries, client) = client_for(&base_url);

    let err = client.fetch(&queries.cdm_after(Utc::now())).unwrap_err();
    assert!(matches!(err, AlertError::AuthenticationOrQuery { status: 500, .. }));
}

#[test]
fn refused_connection_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (queries, client) = client_for(&format!("http://127.0.0.1:{}", port));

    let err = client.fetch(&queries.cdm_after(Utc::now())).unwrap_err();
    assert!(matches!(err, AlertError::Transport(_)));
    assert_eq!(err.stage(), Stage::Network);
}

#[test]
fn failed_login_with_ok_status_is_authentication_error() {
    let (base_url, _forms) = spawn_provider(StatusCode::OK, r#"{"Login":"Failed"}"#);
    let (queries, client) = client_for(&base_url);

    let body = client.fetch(&queries.cdm_after(Utc::now())).unwrap();
    let err = decode(&body, DecodePolicy::Strict).unwrap_err();
    assert!(matches!(err, AlertError::LoginRejected(_)));
    assert_eq!(err.stage(), Stage::Authentication);
}
