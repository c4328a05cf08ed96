//! Collect a month of bank transactions and print them.
//!
//! Run with:
//! ```bash
//! POPBILL_LINK_ID=TESTER POPBILL_SECRET_KEY=... POPBILL_IS_TEST=true \
//! CORP_NUM=1234567890 BANK_CODE=0004 ACCOUNT_NUMBER=... cargo run --example bank_collection
//! ```

use std::time::Duration;

use popbill::{BankSearch, Client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("popbill=info".parse()?))
        .init();

    let corp_num = std::env::var("CORP_NUM")?;
    let bank_code = std::env::var("BANK_CODE")?;
    let account_number = std::env::var("ACCOUNT_NUMBER")?;

    let client = Client::from_env()?;
    let bank = client.easyfinbank();

    println!("Requesting collection job...");
    let job_id = bank
        .request_job(&corp_num, &bank_code, &account_number, "20250101", "20250131", None)
        .await?;
    println!("  Job id: {}", job_id);

    // 3 means finished.
    loop {
        let state = bank.get_job_state(&corp_num, &job_id, None).await?;
        if state.job_state == 3 {
            if state.error_code != 1 {
                println!("Job failed [{}]: {}", state.error_code, state.error_reason);
                return Ok(());
            }
            break;
        }
        println!("  waiting (state {})", state.job_state);
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    let filter = BankSearch {
        page: Some(1),
        per_page: Some(20),
        ..Default::default()
    };
    let summary = bank.summary(&corp_num, &job_id, &filter, None).await?;
    println!(
        "\n{} deposits ({}), {} withdrawals ({})",
        summary.cnt_acc_in, summary.total_acc_in, summary.cnt_acc_out, summary.total_acc_out
    );

    let page = bank.search(&corp_num, &job_id, &filter, None).await?;
    println!("Page {}/{}:", page.page_num, page.page_count);
    for tx in &page.list {
        println!("  {} {} {:>12} {}", tx.trdt, tx.trtype, tx.tram, tx.acctname);
    }

    println!("\nDone!");
    Ok(())
}
