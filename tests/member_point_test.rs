//! Integration tests for point and member operations.

use popbill::{Client, ClientConfig, ContactInfo, JoinForm, PaymentForm, RefundForm};
use wiremock::matchers::{body_json, body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "SwWxqU+0TErBXy/9TVjIPEnI0VTUMMSQZtJf3Ed8q3I=";
const CORP_NUM: &str = "1234567890";

async fn setup() -> (MockServer, Client) {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/POPBILL_TEST/Token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session_token": "tok-A",
            "expiration": "2099-01-01T00:00:00Z",
            "scope": ["member", "140"]
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_config(
        "TESTER",
        SECRET,
        ClientConfig {
            is_test: true,
            service_url: Some(mock_server.uri()),
            auth_url: Some(mock_server.uri()),
            ..Default::default()
        },
    )
    .unwrap();

    (mock_server, client)
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 1, "message": "OK"}))
}

fn url(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": value }))
}

#[tokio::test]
async fn test_balances_go_to_auth_host() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/POPBILL_TEST/Point"))
        .and(header("x-lh-version", "2.0"))
        .and(header("authorization", "Bearer tok-A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"remainPoint": "12500.5"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/POPBILL_TEST/PartnerPoint"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"remainPoint": 99000})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/POPBILL_TEST/URL"))
        .and(query_param("TG", "CHRG"))
        .respond_with(url("https://linkhub.example/partner/CHRG"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let point = client.cashbill().point();
    assert_eq!(point.get_balance(CORP_NUM).await.unwrap(), 12500.5);
    assert_eq!(point.get_partner_balance(CORP_NUM).await.unwrap(), 99000.0);
    assert_eq!(
        point.get_partner_url(CORP_NUM, "CHRG").await.unwrap(),
        "https://linkhub.example/partner/CHRG"
    );
}

#[tokio::test]
async fn test_member_popup_urls() {
    let (mock_server, client) = setup().await;

    for togo in ["CHRG", "PAYMENT", "USEHISTORY", "LOGIN"] {
        Mock::given(method("GET"))
            .and(path("/Member"))
            .and(query_param("TG", togo))
            .respond_with(url(&format!("https://popbill.example/{togo}")))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let point = client.cashbill().point();
    assert!(point.get_charge_url(CORP_NUM, None).await.unwrap().ends_with("/CHRG"));
    assert!(point.get_payment_url(CORP_NUM, None).await.unwrap().ends_with("/PAYMENT"));
    assert!(
        point
            .get_use_history_url(CORP_NUM, None)
            .await
            .unwrap()
            .ends_with("/USEHISTORY")
    );
    assert!(
        client
            .cashbill()
            .member()
            .get_access_url(CORP_NUM, Some("tester01"))
            .await
            .unwrap()
            .ends_with("/LOGIN")
    );
}

#[tokio::test]
async fn test_payment_flow() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Payment"))
        .and(body_json(serde_json::json!({
            "settlerName": "Hong",
            "paymentMethod": "계좌이체",
            "settleCost": "11000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "message": "OK",
            "settleCode": "202501010000000001"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Payment/202501010000000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "settlerName": "Hong",
            "settleCost": "11000",
            "settlePoint": "10000",
            "settleState": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/PaymentHistory"))
        .and(query_param("SDate", "20250101"))
        .and(query_param("EDate", "20250131"))
        .and(query_param("Page", "2"))
        .and(query_param("PerPage", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "total": 51,
            "perPage": 50,
            "pageNum": 2,
            "pageCount": 2,
            "list": [{"settleCode": "x", "settleState": 2}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/UseHistory"))
        .and(query_param("Order", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "total": 1,
            "list": [{"doctype": "Cashbill", "usageAmount": "100", "remainPoint": "12400"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let point = client.cashbill().point();
    let payment = point
        .payment_request(
            CORP_NUM,
            &PaymentForm {
                settler_name: "Hong".to_string(),
                payment_method: "계좌이체".to_string(),
                settle_cost: "11000".to_string(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(payment.settle_code, "202501010000000001");

    let settled = point
        .get_settle_result(CORP_NUM, &payment.settle_code, None)
        .await
        .unwrap();
    assert_eq!(settled.settle_point, "10000");
    assert_eq!(settled.settle_state, 1);

    let history = point
        .get_payment_history(CORP_NUM, "20250101", "20250131", Some(2), Some(50), None)
        .await
        .unwrap();
    assert_eq!(history.total, 51);
    assert_eq!(history.list.len(), 1);

    let usage = point
        .get_use_history(CORP_NUM, "20250101", "20250131", None, None, Some("A"), None)
        .await
        .unwrap();
    assert_eq!(usage.list[0].usage_amount, "100");
}

#[tokio::test]
async fn test_refund_flow() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Refund"))
        .and(body_partial_json(serde_json::json!({
            "contactName": "Hong",
            "requestPoint": "5000",
            "contactTEL": "010-1111-2222"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "message": "OK",
            "refundCode": "023040000017"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Refund/023040000017"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "requestPoint": "5000",
            "state": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/RefundHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "total": 1,
            "list": [{"requestPoint": "5000", "state": 1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/RefundPoint"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"refundableBalance": "7500"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let point = client.easyfinbank().point();
    let refund = point
        .refund(
            CORP_NUM,
            &RefundForm {
                contact_name: "Hong".to_string(),
                contact_tel: Some("010-1111-2222".to_string()),
                request_point: "5000".to_string(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(refund.refund_code, "023040000017");

    let info = point.get_refund_info(CORP_NUM, &refund.refund_code, None).await.unwrap();
    assert_eq!(info.request_point, "5000");

    let history = point.get_refund_history(CORP_NUM, None, None, None).await.unwrap();
    assert_eq!(history.list.len(), 1);

    assert_eq!(point.get_refundable_balance(CORP_NUM, None).await.unwrap(), 7500.0);
}

#[tokio::test]
async fn test_join_member_fills_link_id_without_token() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Join"))
        .and(header_exists("authorization"))
        .respond_with(ok())
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Join"))
        .and(body_partial_json(serde_json::json!({
            "LinkID": "TESTER",
            "CorpNum": "1234567890",
            "ID": "example01"
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/IDCheck"))
        .and(query_param("ID", "example01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "message": "available"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let member = client.cashbill().member();
    let checked = member.check_id("example01").await.unwrap();
    assert_eq!(checked.code, 0);

    let joined = member
        .join_member(JoinForm {
            corp_num: CORP_NUM.to_string(),
            ceo_name: "Hong".to_string(),
            corp_name: "Example Co.".to_string(),
            id: "example01".to_string(),
            pwd: "change-me-123!".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(joined.code, 1);
}

#[tokio::test]
async fn test_corp_info_and_contacts() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/CorpInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ceoname": "Hong",
            "corpName": "Example Co.",
            "addr": "Seoul",
            "bizType": "Retail",
            "bizClass": "Coffee"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/CorpInfo"))
        .and(body_partial_json(serde_json::json!({"corpName": "Renamed Co."})))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/IDs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "tester01", "personName": "Hong", "mgrYN": true, "state": 1},
            {"id": "tester02", "personName": "Kim", "mgrYN": false, "state": 1}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Contact"))
        .and(body_json(serde_json::json!({"id": "tester02"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "tester02",
            "personName": "Kim",
            "searchRole": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/IDs/New"))
        .and(body_partial_json(serde_json::json!({"id": "tester03", "personName": "Lee"})))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Contact/Delete"))
        .and(query_param("ContactID", "tester02"))
        .and(header("x-pb-userid", "tester01"))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/QuitRequest"))
        .and(body_json(serde_json::json!({"quitReason": "closing business"})))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    let member = client.cashbill().member();

    let mut corp = member.get_corp_info(CORP_NUM, None).await.unwrap();
    assert_eq!(corp.corp_name, "Example Co.");
    corp.corp_name = "Renamed Co.".to_string();
    member.update_corp_info(CORP_NUM, &corp, None).await.unwrap();

    let contacts = member.list_contact(CORP_NUM, None).await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].mgr_yn, Some(true));

    let contact = member.get_contact_info(CORP_NUM, "tester02", None).await.unwrap();
    assert_eq!(contact.person_name, "Kim");
    assert_eq!(contact.search_role, Some(1));

    member
        .regist_contact(
            CORP_NUM,
            &ContactInfo {
                id: Some("tester03".to_string()),
                person_name: "Lee".to_string(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    member.delete_contact(CORP_NUM, "tester02", "tester01").await.unwrap();
    member
        .quit_member(CORP_NUM, "closing business", None)
        .await
        .unwrap();
}
