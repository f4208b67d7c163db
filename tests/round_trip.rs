use lore_calendar::{CalendarConfiguration, CalendarDate, LeapYearRule};

fn calendars() -> Vec<(&'static str, CalendarConfiguration)> {
    let mut no_leap = CalendarConfiguration::harptos();
    no_leap.leap_year_rule = LeapYearRule::None;
    let mut uneven = CalendarConfiguration::gregorian();
    uneven.leap_year_rule = LeapYearRule::Custom;
    uneven.leap_year_offset = 7;
    uneven.leap_day_month_index = 11;
    vec![
        ("gregorian", CalendarConfiguration::gregorian()),
        ("harptos", CalendarConfiguration::harptos()),
        ("harptos without leap years", no_leap),
        ("seven-year leap in the last month", uneven),
    ]
}

#[test]
fn test_day_numbers_round_trip() {
    for (name, config) in calendars() {
        for n in (-50_000..50_000).step_by(7) {
            let date = config.day_number_to_date(n).unwrap();
            assert_eq!(
                config.date_to_day_number(&date),
                Some(n),
                "{name}: day number {n} via {date}"
            );
        }
    }
}

#[test]
fn test_dates_round_trip() {
    for (name, config) in calendars() {
        for year in -200..200 {
            for month in 0..config.month_count() {
                let last = config.days_in_month(month, year);
                for day in [1, last / 2 + 1, last] {
                    let date = CalendarDate::new(year, month, day);
                    let n = config.date_to_day_number(&date).unwrap();
                    assert_eq!(config.day_number_to_date(n), Some(date), "{name}: {date}");
                }
            }
        }
    }
}

#[test]
fn test_consecutive_days_are_consecutive_numbers() {
    for (name, config) in calendars() {
        let mut date = CalendarDate::new(-30, 0, 1);
        let mut previous = config.date_to_day_number(&date).unwrap();
        while date.year < 30 {
            date = config.add_days_to_date(&date, 1);
            let n = config.date_to_day_number(&date).unwrap();
            assert_eq!(n, previous + 1, "{name}: {date}");
            previous = n;
        }
    }
}

#[test]
fn test_year_zero_continuity() {
    for (name, config) in calendars() {
        let last_month = config.month_count() - 1;
        let last_day = config.days_in_month(last_month, 0);
        let end_of_year_zero = CalendarDate::new(0, last_month, last_day);
        assert_eq!(config.date_to_day_number(&end_of_year_zero), Some(0), "{name}");
        assert_eq!(
            config.date_to_day_number(&CalendarDate::new(1, 0, 1)),
            Some(1),
            "{name}"
        );
        assert_eq!(config.day_number_to_date(0), Some(end_of_year_zero), "{name}");
    }
}

#[test]
fn test_leap_day_scenario() {
    let config = CalendarConfiguration::gregorian();
    assert!(config.is_leap_year(2024));
    assert_eq!(config.days_in_month(1, 2024), 29);

    let leap_day = CalendarDate::new(2024, 1, 29);
    let n = config.date_to_day_number(&leap_day).unwrap();
    assert_eq!(n, 738_945);
    assert_eq!(config.day_number_to_date(n), Some(leap_day));
    assert_eq!(config.day_number_to_date(n + 1), Some(CalendarDate::new(2024, 2, 1)));
    assert_eq!(
        config.add_days_to_date(&leap_day, 1),
        CalendarDate::new(2024, 2, 1)
    );
    assert_eq!(config.format_date(&leap_day), "29 February, 2024");
}

#[test]
fn test_harptos_midsummer_leap_day() {
    let config = CalendarConfiguration::harptos();
    // Shieldmeet follows Midsummer every fourth year.
    assert_eq!(config.days_in_month(9, 1372), 2);
    assert_eq!(config.days_in_month(9, 1373), 1);
    assert_eq!(config.year_length(1372), 366);
    assert_eq!(config.year_length(1373), 365);

    let shieldmeet = CalendarDate::new(1372, 9, 2);
    let n = config.date_to_day_number(&shieldmeet).unwrap();
    assert_eq!(
        config.day_number_to_date(n + 1),
        Some(CalendarDate::new(1372, 10, 1))
    );
}
