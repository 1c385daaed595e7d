use civiltime::{Clock, Date, FixedZone, Precision, Time, TimeDelta, Zone};

fn main() -> civiltime::Result<()> {
    let berlin = Zone::new("Europe/Berlin")?;
    let clock = Clock::with_zones(FixedZone(berlin)).with_precision(Precision::Seconds);

    let now = clock.now(None)?;
    println!("{now}");
    println!("{}", now.strftime("%A, %d. %B %Y %I:%M%p")?);
    println!("utcoffset() = {}", now.utcoffset());

    // Clocks go back at 03:00 CEST: 02:30 happens twice, the first one wins.
    let ambiguous = clock.combine(Date::new(2021, 10, 31)?, Time::from_hms(2, 30, 0)?, None)?;
    println!("ambiguous 02:30 resolves to {ambiguous} ({})", ambiguous.instant());

    // Clocks jump from 02:00 to 03:00: 02:30 does not exist.
    let missing = clock.combine(Date::new(2021, 3, 28)?, Time::from_hms(2, 30, 0)?, None)?;
    println!("missing 02:30 resolves to {missing}");

    let day_before = clock.combine(Date::new(2021, 3, 27)?, Time::from_hms(12, 0, 0)?, None)?;
    let day_after = day_before + TimeDelta::from_days(1);
    println!("{day_before} + 1 day = {day_after}");
    println!("{day_after} < {day_before}? {}", day_after < day_before);
    Ok(())
}
