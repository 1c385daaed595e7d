use civiltime::{Date, DateTime, Span, TimeDelta};

fn main() -> civiltime::Result<()> {
    let today = Date::today()?;
    println!("Today's date is {today}");

    let now = DateTime::now(None)?;
    println!("Today's datetime is {now}");

    // argument order does not matter
    let delta = TimeDelta::new([
        Span::Weeks(1),
        Span::Days(2),
        Span::Hours(3),
        Span::Seconds(240),
        Span::Microseconds(10_000),
    ])?;
    println!("Delta to add: {delta}");
    println!("Added result: {}", now + delta);

    let tehran = DateTime::now(Some("Asia/Tehran"))?;
    println!("Time in {} is {tehran}", tehran.tzinfo());

    let parsed = DateTime::strptime("21/11/92 16:30", "%d/%m/%y %H:%M")?;
    println!("From strptime: {parsed}");

    let utc = DateTime::utcfromtimestamp(1_497_252_490.0282006)?;
    println!("UTC from timestamp: {utc}, back to timestamp: {}", utc.timestamp());
    println!("Difference: {}", utc - parsed);

    let x3 = TimeDelta::new([Span::Hours(23), Span::Microseconds(500_000)])?;
    println!("{x3} times 4 is {}, times 1.2 is {}", 4 * x3, x3 * 1.2);
    Ok(())
}
