//! Integration tests for cash receipt operations.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use popbill::{
    Cashbill, CashbillSearch, Client, ClientConfig, RegistIssueOptions, RevokeIssueOptions,
};
use sha2::{Digest, Sha256};
use wiremock::matchers::{
    body_json, body_partial_json, body_string, header, method, path, query_param,
};
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

fn sample_cashbill(mgt_key: &str) -> Cashbill {
    Cashbill {
        mgt_key: mgt_key.to_string(),
        trade_type: Some("승인거래".to_string()),
        trade_usage: "소득공제용".to_string(),
        taxation_type: Some("과세".to_string()),
        total_amount: "11000".to_string(),
        supply_cost: "10000".to_string(),
        tax: "1000".to_string(),
        identity_num: "01011112222".to_string(),
        customer_name: "Kim".to_string(),
        item_name: "Coffee".to_string(),
        ..Default::default()
    }
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 1, "message": "OK"}))
}

#[tokio::test]
async fn test_regist_issue() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill"))
        .and(header("x-http-method-override", "ISSUE"))
        .and(header("x-pb-userid", "tester01"))
        .and(header("content-type", "application/json; charset=utf8"))
        .and(body_partial_json(serde_json::json!({
            "mgtKey": "K-1",
            "tradeUsage": "소득공제용",
            "totalAmount": "11000",
            "memo": "first issue",
            "emailSubject": "Your receipt"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "message": "OK",
            "confirmNum": "TB0000001",
            "tradeDate": "20250101"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issued = client
        .cashbill()
        .regist_issue(
            CORP_NUM,
            &sample_cashbill("K-1"),
            RegistIssueOptions {
                memo: Some("first issue".to_string()),
                user_id: Some("tester01".to_string()),
                email_subject: Some("Your receipt".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(issued.code, 1);
    assert_eq!(issued.confirm_num, "TB0000001");
    assert_eq!(issued.trade_date, "20250101");
}

#[tokio::test]
async fn test_revoke_regist_issue_partial() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill"))
        .and(header("x-http-method-override", "REVOKEISSUE"))
        .and(body_json(serde_json::json!({
            "mgtKey": "K-2",
            "orgConfirmNum": "TB0000001",
            "orgTradeDate": "20250101",
            "isPartCancel": true,
            "cancelType": 1,
            "supplyCost": "5000",
            "tax": "500",
            "totalAmount": "5500"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "message": "OK",
            "confirmNum": "TB0000002",
            "tradeDate": "20250102"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issued = client
        .cashbill()
        .revoke_regist_issue(
            CORP_NUM,
            "K-2",
            "TB0000001",
            "20250101",
            &RevokeIssueOptions {
                is_part_cancel: Some(true),
                cancel_type: Some(1),
                supply_cost: Some("5000".to_string()),
                tax: Some("500".to_string()),
                total_amount: Some("5500".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(issued.confirm_num, "TB0000002");
}

#[tokio::test]
async fn test_bulk_submit_and_result() {
    let (mock_server, client) = setup().await;
    let submit_id = format!("SUBMIT-{}", uuid::Uuid::new_v4().simple());

    Mock::given(method("POST"))
        .and(path("/Cashbill"))
        .and(header("x-http-method-override", "BULKISSUE"))
        .and(header("x-pb-submit-id", submit_id.as_str()))
        .and(body_partial_json(serde_json::json!({
            "cashbills": [{"mgtKey": "B-1"}, {"mgtKey": "B-2"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "message": "OK",
            "receiptID": "021012312000000001"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/Cashbill/BULK/{}/State", submit_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "submitID": submit_id.as_str(),
            "submitCount": 2,
            "successCount": 2,
            "failCount": 0,
            "txState": 3,
            "issueResult": [
                {"mgtKey": "B-1", "code": 1, "confirmNum": "TB0000010"},
                {"mgtKey": "B-2", "code": 1, "confirmNum": "TB0000011"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    let receipt = cashbill
        .bulk_submit(
            CORP_NUM,
            &submit_id,
            &[sample_cashbill("B-1"), sample_cashbill("B-2")],
            None,
        )
        .await
        .unwrap();
    assert_eq!(receipt.receipt_id, "021012312000000001");

    let result = cashbill.get_bulk_result(CORP_NUM, &submit_id, None).await.unwrap();
    assert_eq!(result.tx_state, 3);
    assert_eq!(result.issue_result.len(), 2);
    assert_eq!(result.issue_result[1].confirm_num.as_deref(), Some("TB0000011"));
}

#[tokio::test]
async fn test_send_email_carries_body_digest() {
    let (mock_server, client) = setup().await;

    let body = br#"{"receiver":"buyer@example.com"}"#;
    let digest = BASE64.encode(Sha256::digest(body));

    Mock::given(method("POST"))
        .and(path("/Cashbill/K-1"))
        .and(header("x-http-method-override", "EMAIL"))
        .and(header("x-pb-message-digest", digest.as_str()))
        .and(body_string(String::from_utf8(body.to_vec()).unwrap()))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client
        .cashbill()
        .send_email(CORP_NUM, "K-1", "buyer@example.com", None)
        .await
        .unwrap();
    assert_eq!(response.code, 1);
}

#[tokio::test]
async fn test_send_sms_and_fax() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/K-1"))
        .and(header("x-http-method-override", "SMS"))
        .and(body_json(serde_json::json!({
            "sender": "07000000000",
            "receiver": "01011112222",
            "contents": "Receipt issued"
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/K-1"))
        .and(header("x-http-method-override", "FAX"))
        .and(body_json(serde_json::json!({
            "sender": "07000000000",
            "receiver": "0200000000"
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    cashbill
        .send_sms(CORP_NUM, "K-1", "07000000000", "01011112222", "Receipt issued", None)
        .await
        .unwrap();
    cashbill
        .send_fax(CORP_NUM, "K-1", "07000000000", "0200000000", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/K-1"))
        .and(header("x-http-method-override", "DELETE"))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.cashbill().delete(CORP_NUM, "K-1", None).await.unwrap();
    assert_eq!(response.message, "OK");
}

#[tokio::test]
async fn test_delete_accepts_string_code() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/K-1"))
        .and(header("x-http-method-override", "DELETE"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"code": "1", "message": "ok"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.cashbill().delete(CORP_NUM, "K-1", None).await.unwrap();
    assert_eq!(response.code, 1);
    assert_eq!(response.message, "ok");
}

#[tokio::test]
async fn test_assign_mgt_key_sends_form() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/022010417045000001"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("MgtKey=K-9"))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    client
        .cashbill()
        .assign_mgt_key(CORP_NUM, "022010417045000001", "K-9", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_check_mgt_key_in_use() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/USED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "itemKey": "022010417045000001",
            "mgtKey": "USED"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/FREE"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -14000003,
            "message": "not found"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/BROKEN"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -10000001,
            "message": "other failure"
        })))
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    assert!(cashbill.check_mgt_key_in_use(CORP_NUM, "USED", None).await.unwrap());
    assert!(!cashbill.check_mgt_key_in_use(CORP_NUM, "FREE", None).await.unwrap());

    let err = cashbill
        .check_mgt_key_in_use(CORP_NUM, "BROKEN", None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(-10000001));
}

#[tokio::test]
async fn test_get_infos_and_detail() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/States"))
        .and(body_json(serde_json::json!(["K-1", "K-2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"itemKey": "a", "mgtKey": "K-1", "stateCode": 304},
            {"itemKey": "b", "mgtKey": "K-2", "stateCode": 300}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/K-1"))
        .and(query_param("Detail", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "mgtKey": "K-1",
            "confirmNum": "TB0000001",
            "franchiseCEOName": "Lee",
            "smssendYN": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    let infos = cashbill.get_infos(CORP_NUM, &["K-1", "K-2"], None).await.unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[1].state_code, 300);

    let detail = cashbill.get_detail_info(CORP_NUM, "K-1", None).await.unwrap();
    assert_eq!(detail.franchise_ceo_name, "Lee");
    assert!(detail.smssend_yn);
}

#[tokio::test]
async fn test_search_query_mapping() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/Search"))
        .and(query_param("DType", "T"))
        .and(query_param("SDate", "20250101"))
        .and(query_param("EDate", "20250131"))
        .and(query_param("State", "3**,4**"))
        .and(query_param("TradeType", "N,C"))
        .and(query_param("TradeUsage", "P"))
        .and(query_param("TaxationType", "T"))
        .and(query_param("Page", "2"))
        .and(query_param("PerPage", "50"))
        .and(query_param("Order", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1,
            "total": "51",
            "perPage": "50",
            "pageNum": "2",
            "pageCount": "2",
            "list": [{"itemKey": "z", "mgtKey": "K-51", "stateCode": 304}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .cashbill()
        .search(
            CORP_NUM,
            &CashbillSearch {
                dtype: "T".to_string(),
                s_date: "20250101".to_string(),
                e_date: "20250131".to_string(),
                state: vec!["3**".to_string(), "4**".to_string()],
                trade_type: vec!["N".to_string(), "C".to_string()],
                trade_usage: vec!["P".to_string()],
                taxation_type: vec!["T".to_string()],
                page: Some(2),
                per_page: Some(50),
                order: Some("A".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(result.total, 51);
    assert_eq!(result.page_count, 2);
    assert_eq!(result.list[0].mgt_key, "K-51");
}

#[tokio::test]
async fn test_view_urls() {
    let (mock_server, client) = setup().await;

    for togo in ["POPUP", "VIEW", "PRINT", "MAIL", "PDF"] {
        Mock::given(method("GET"))
            .and(path("/Cashbill/K-1"))
            .and(query_param("TG", togo))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": format!("https://popbill-test.linkhub.co.kr/{}", togo)
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/Cashbill/Prints"))
        .and(body_json(serde_json::json!(["K-1", "K-2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://popbill-test.linkhub.co.kr/PRINTS"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cashbill"))
        .and(query_param("TG", "TBOX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://popbill-test.linkhub.co.kr/TBOX"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    assert!(cashbill.get_popup_url(CORP_NUM, "K-1", None).await.unwrap().ends_with("/POPUP"));
    assert!(cashbill.get_view_url(CORP_NUM, "K-1", None).await.unwrap().ends_with("/VIEW"));
    assert!(cashbill.get_print_url(CORP_NUM, "K-1", None).await.unwrap().ends_with("/PRINT"));
    assert!(cashbill.get_mail_url(CORP_NUM, "K-1", None).await.unwrap().ends_with("/MAIL"));
    assert!(cashbill.get_pdf_url(CORP_NUM, "K-1", None).await.unwrap().ends_with("/PDF"));
    assert!(
        cashbill
            .get_mass_print_url(CORP_NUM, &["K-1", "K-2"], None)
            .await
            .unwrap()
            .ends_with("/PRINTS")
    );
    assert!(cashbill.get_url(CORP_NUM, "TBOX", None).await.unwrap().ends_with("/TBOX"));
}

#[tokio::test]
async fn test_email_config() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/EmailSendConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"emailType": "CSH_ISSUE", "sendYN": true},
            {"emailType": "CSH_CANCEL", "sendYN": false}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Cashbill/EmailSendConfig"))
        .and(query_param("EmailType", "CSH_CANCEL"))
        .and(query_param("SendYN", "true"))
        .respond_with(ok())
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    let configs = cashbill.list_email_config(CORP_NUM, None).await.unwrap();
    assert_eq!(configs.len(), 2);
    assert!(configs[0].send_yn);

    cashbill
        .update_email_config(CORP_NUM, "CSH_CANCEL", true, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unit_cost_and_charge_info() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Cashbill"))
        .and(query_param("cfg", "UNITCOST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "unitCost": "4.5"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Cashbill/ChargeInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "unitCost": "4.5",
            "chargeMethod": "metered",
            "rateSystem": "point"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cashbill = client.cashbill();
    assert_eq!(cashbill.get_unit_cost(CORP_NUM).await.unwrap(), 4.5);
    let info = cashbill.get_charge_info(CORP_NUM, None).await.unwrap();
    assert_eq!(info.charge_method, "metered");
}
