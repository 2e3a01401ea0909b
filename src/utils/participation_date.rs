use chrono::{NaiveDate, Utc};
use chrono_tz::America::Montevideo;

/// La ventana de participación se calcula siempre en hora civil de Uruguay,
/// nunca con el reloj del visitante.
pub fn today_in_uruguay() -> NaiveDate {
    Utc::now().with_timezone(&Montevideo).date_naive()
}

/// Solo se participa el día exacto del evento (granularidad de día, la hora
/// guardada en la fecha del sorteo no cuenta). Sin fecha no hay ventana.
pub fn is_participation_allowed(raffle_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match raffle_date {
        Some(date) => date == today,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_allowed_only_on_event_day() {
        let today = d(2026, 3, 14);
        assert!(is_participation_allowed(Some(d(2026, 3, 14)), today));
        assert!(!is_participation_allowed(Some(d(2026, 3, 13)), today));
        assert!(!is_participation_allowed(Some(d(2026, 3, 15)), today));
        assert!(!is_participation_allowed(Some(d(2025, 3, 14)), today));
    }

    #[test]
    fn test_no_date_means_no_window() {
        assert!(!is_participation_allowed(None, d(2026, 3, 14)));
    }

    #[test]
    fn test_today_in_uruguay_is_stable_across_calls() {
        // Granularidad de día: dos lecturas seguidas caen en el mismo día
        // salvo que el test corra exactamente a medianoche de Montevideo.
        let a = today_in_uruguay();
        let b = today_in_uruguay();
        assert!(a == b || b == a.succ_opt().unwrap());
    }
}
