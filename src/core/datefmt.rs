//! # Date Formatting (pt-BR)
//!
//! Absolute and relative timestamp labels. Both are pure functions of the
//! timestamp and the rendering instant, so callers recompute them every
//! frame instead of storing them.
//!
//! ```text
//! format_absolute(2022-09-10 09:00)           → "10 de setembro as 09:00h"
//! format_relative(09:00, now = 11:10)         → "há cerca de 2 horas"
//! format_relative(09:00, now = 08:55)         → "em 5 minutos"
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// `"d de <mês> as HH:mm'h'"`, e.g. `"10 de setembro as 09:00h"`.
pub fn format_absolute(t: NaiveDateTime) -> String {
    format!(
        "{} de {} as {:02}:{:02}h",
        t.day(),
        MONTHS[t.month0() as usize],
        t.hour(),
        t.minute()
    )
}

/// Distance between `t` and `now` in words, with a "há"/"em" suffix.
pub fn format_relative(t: NaiveDateTime, now: NaiveDateTime) -> String {
    let (earlier, later, past) = if t <= now {
        (t, now, true)
    } else {
        (now, t, false)
    };
    let distance = distance_in_words(earlier, later);
    if past {
        format!("há {distance}")
    } else {
        format!("em {distance}")
    }
}

/// Integer division rounding halves up, for non-negative operands.
fn round_div(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

fn plural(count: i64, one: &str, other: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        other.replace("{}", &count.to_string())
    }
}

/// Whole calendar months from `earlier` to `later`.
fn months_between(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let mut months = (later.year() - earlier.year()) as i64 * 12
        + later.month() as i64
        - earlier.month() as i64;
    let later_rest = (later.day(), later.time());
    let earlier_rest = (earlier.day(), earlier.time());
    if later_rest < earlier_rest {
        months -= 1;
    }
    months.max(0)
}

fn distance_in_words(earlier: NaiveDateTime, later: NaiveDateTime) -> String {
    let seconds = (later - earlier).num_seconds();
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        return if minutes == 0 {
            "menos de um minuto".to_string()
        } else {
            plural(minutes, "1 minuto", "{} minutos")
        };
    }
    if minutes < 45 {
        return plural(minutes, "1 minuto", "{} minutos");
    }
    if minutes < 90 {
        return "cerca de 1 hora".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = round_div(minutes, MINUTES_IN_HOUR);
        return plural(hours, "cerca de 1 hora", "cerca de {} horas");
    }
    if minutes < 2520 {
        return "1 dia".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = round_div(minutes, MINUTES_IN_DAY);
        return plural(days, "1 dia", "{} dias");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = round_div(minutes, MINUTES_IN_MONTH);
        return plural(months, "cerca de 1 mês", "cerca de {} meses");
    }

    let months = months_between(earlier, later);
    if months < 12 {
        let nearest = round_div(minutes, MINUTES_IN_MONTH);
        return plural(nearest, "1 mês", "{} meses");
    }

    let months_since_start_of_year = months % 12;
    let years = months / 12;
    if months_since_start_of_year < 3 {
        plural(years, "cerca de 1 ano", "cerca de {} anos")
    } else if months_since_start_of_year < 9 {
        plural(years, "mais de 1 ano", "mais de {} anos")
    } else {
        plural(years + 1, "quase 1 ano", "quase {} anos")
    }
}
