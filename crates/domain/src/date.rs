use chrono::prelude::*;
use chrono::LocalResult;
use chrono_tz::Tz;

pub fn is_valid_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let datestr = String::from(datestr);
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr));
    }
    let year = dates[0].parse();
    let month = dates[1].parse();
    let day = dates[2].parse();

    if year.is_err() || month.is_err() || day.is_err() {
        return Err(anyhow::Error::msg(datestr));
    }

    let year = year.unwrap();
    let month = month.unwrap();
    let day = day.unwrap();
    if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
        return Err(anyhow::Error::msg(datestr));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr));
    }

    Ok((year, month, day))
}

pub fn is_valid_time(timestr: &str) -> anyhow::Result<(u32, u32)> {
    let timestr = String::from(timestr);
    let times = timestr.split(':').collect::<Vec<_>>();
    if times.len() != 2 {
        return Err(anyhow::Error::msg(timestr));
    }
    let hour = times[0].parse();
    let minute = times[1].parse();

    if hour.is_err() || minute.is_err() {
        return Err(anyhow::Error::msg(timestr));
    }

    let hour = hour.unwrap();
    let minute = minute.unwrap();
    if hour > 23 || minute > 59 {
        return Err(anyhow::Error::msg(timestr));
    }

    Ok((hour, minute))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}

/// Combines a local calendar date and wall-clock time in the given zone
/// into the UTC instant it denotes. Returns `None` for local times that
/// do not exist or exist twice because of a DST transition.
pub fn to_utc(
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
    match tz.from_local_datetime(&local) {
        LocalResult::Single(date) => Some(date.with_timezone(&Utc)),
        _ => None,
    }
}

pub fn format_local(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
