/// Validates a zero-padded `YYYY-MM-DD` calendar date and returns its parts.
///
/// The padding requirement is strict: due-time matching is plain string
/// equality, so "2024-3-1" and "2024-03-01" must never both be accepted.
pub fn is_valid_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 || dates[0].len() != 4 || dates[1].len() != 2 || dates[2].len() != 2 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let year = dates[0].parse();
    let month = dates[1].parse();
    let day = dates[2].parse();

    if year.is_err() || month.is_err() || day.is_err() {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let year = year.unwrap();
    let month = month.unwrap();
    let day = day.unwrap();
    if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    Ok((year, month, day))
}

/// Validates a zero-padded 24 hour `HH:MM` clock time and returns its parts.
pub fn is_valid_time(timestr: &str) -> anyhow::Result<(u32, u32)> {
    let parts = timestr.split(':').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return Err(anyhow::Error::msg(timestr.to_string()));
    }
    let hours = parts[0].parse();
    let minutes = parts[1].parse();

    if hours.is_err() || minutes.is_err() {
        return Err(anyhow::Error::msg(timestr.to_string()));
    }

    let hours = hours.unwrap();
    let minutes = minutes.unwrap();
    if hours > 23 || minutes > 59 {
        return Err(anyhow::Error::msg(timestr.to_string()));
    }

    Ok((hours, minutes))
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
