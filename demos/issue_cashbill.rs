//! Issue a cash receipt and look it up again.
//!
//! Run with:
//! ```bash
//! POPBILL_LINK_ID=TESTER POPBILL_SECRET_KEY=... POPBILL_IS_TEST=true \
//! CORP_NUM=1234567890 cargo run --example issue_cashbill
//! ```

use popbill::{Cashbill, Client, RegistIssueOptions};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("popbill=debug".parse()?))
        .init();

    let corp_num = std::env::var("CORP_NUM").unwrap_or_else(|_| "1234567890".to_string());
    let client = Client::from_env()?;
    let cashbill = client.cashbill();

    println!("Balance: {}", cashbill.point().get_balance(&corp_num).await?);

    let mgt_key = format!("DEMO-{}", &Uuid::new_v4().simple().to_string()[..12]);
    if cashbill.check_mgt_key_in_use(&corp_num, &mgt_key, None).await? {
        println!("{} is already in use", mgt_key);
        return Ok(());
    }

    println!("\nIssuing {}...", mgt_key);
    let issued = cashbill
        .regist_issue(
            &corp_num,
            &Cashbill {
                mgt_key: mgt_key.clone(),
                trade_type: Some("승인거래".to_string()),
                trade_usage: "소득공제용".to_string(),
                taxation_type: Some("과세".to_string()),
                supply_cost: "10000".to_string(),
                tax: "1000".to_string(),
                service_fee: Some("0".to_string()),
                total_amount: "11000".to_string(),
                identity_num: "01011112222".to_string(),
                customer_name: "Hong Gildong".to_string(),
                item_name: "Coffee beans".to_string(),
                ..Default::default()
            },
            RegistIssueOptions {
                memo: Some("issued from the demo".to_string()),
                ..Default::default()
            },
        )
        .await?;
    println!("  Confirm number: {}", issued.confirm_num);
    println!("  Trade date:     {}", issued.trade_date);

    let info = cashbill.get_info(&corp_num, &mgt_key, None).await?;
    println!("\nState: {} ({})", info.state_code, info.state_dt);

    let url = cashbill.get_view_url(&corp_num, &mgt_key, None).await?;
    println!("View URL: {}", url);

    println!("\nDone!");
    Ok(())
}
