/// time control - deterministic interest with a controlled clock
use chrono::{Duration, TimeZone, Utc};
use interest_ledger::{Ledger, RateColumn, Rate, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = Ledger::standard();

    let record = ledger.try_add_transaction("2024-01-01", "1000", None, &time)?;
    println!("added on {}: {} days elapsed", time.now().format("%Y-%m-%d"), record.days_elapsed);

    // interest is a snapshot taken when the record is added
    controller.advance(Duration::days(30));
    ledger.try_add_transaction("2024-01-01", "1000", None, &time)?;
    println!("added on {}", time.now().format("%Y-%m-%d"));

    let column = RateColumn::Fixed(Rate::from_percentage(24));
    for record in ledger.records() {
        if let Some(interest) = record.interest_at(column) {
            println!("  {} at 24%: {:.2}", record.date, interest.round_dp(2).as_decimal());
        }
    }

    println!("\n{}", ledger.report());
    Ok(())
}
