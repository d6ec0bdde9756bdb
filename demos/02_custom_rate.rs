/// custom rate - a user-supplied rate alongside the fixed ones
use chrono::{TimeZone, Utc};
use interest_ledger::{Ledger, LedgerConfig, LedgerEvent, Rate, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    ));

    let mut ledger = Ledger::new(LedgerConfig::with_custom_rate(Rate::from_percentage(12)))?;
    ledger.subscribe(|event| {
        if let LedgerEvent::CustomRateChanged { old_rate, new_rate, .. } = event {
            println!("custom rate changed: {:?} -> {:?}", old_rate, new_rate);
        }
    });

    ledger.add_transaction("2024-06-01", "5000", None, &time);

    // later records use the new rate, earlier ones keep theirs
    ledger.set_custom_rate("15.5");
    ledger.add_transaction("2024-09-01", "2000", None, &time);

    println!("{}", ledger.report());
    println!("{}", ledger.report().to_json_pretty()?);
    Ok(())
}
