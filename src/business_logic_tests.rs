#[cfg(test)]
mod tests {
    use crate::commands::order::weekly::{
        days_in_month, generate_orders_for_month, WeeklyOrder,
    };
    use chrono::{Datelike, NaiveDate};

    fn weekly(month: u32, year: i32) -> WeeklyOrder {
        WeeklyOrder {
            customer_id: "CUS-TEST0001".to_string(),
            customer_name: "Asha Patel".to_string(),
            item: "Milk".to_string(),
            month,
            year,
            monday: 0.0,
            tuesday: 0.0,
            wednesday: 0.0,
            thursday: 0.0,
            friday: 0.0,
            saturday: 0.0,
            sunday: 0.0,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        // Leap-year February
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        // Century rule
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_generate_orders_leap_february() {
        let mut order = weekly(2, 2024);
        order.monday = 2.0;
        order.wednesday = 1.0;

        let orders = generate_orders_for_month(&order);

        // February 2024 has four Mondays and four Wednesdays.
        assert_eq!(orders.len(), 8);

        let mondays: Vec<_> = orders
            .iter()
            .filter(|o| o.quantity == 2.0)
            .map(|o| o.order_date)
            .collect();
        let wednesdays: Vec<_> = orders
            .iter()
            .filter(|o| o.quantity == 1.0)
            .map(|o| o.order_date)
            .collect();

        let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        assert_eq!(mondays, vec![d(5), d(12), d(19), d(26)]);
        assert_eq!(wednesdays, vec![d(7), d(14), d(21), d(28)]);

        for o in &orders {
            assert_eq!(o.status, "pending");
            assert_eq!(o.customer_name, "Asha Patel");
            assert_eq!(o.item, "Milk");
        }
    }

    #[test]
    fn test_generate_orders_sorted_ascending() {
        let mut order = weekly(3, 2024);
        order.monday = 1.0;
        order.tuesday = 1.0;
        order.wednesday = 1.0;
        order.thursday = 1.0;
        order.friday = 1.0;
        order.saturday = 1.0;
        order.sunday = 1.0;

        let orders = generate_orders_for_month(&order);

        // Every day of the month, in calendar order.
        assert_eq!(orders.len(), 31);
        for pair in orders.windows(2) {
            assert!(pair[0].order_date < pair[1].order_date);
        }
        assert_eq!(
            orders[0].order_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            orders[30].order_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_generate_orders_all_zero_is_empty() {
        let order = weekly(6, 2025);
        assert!(generate_orders_for_month(&order).is_empty());
    }

    #[test]
    fn test_generate_orders_skips_non_positive_days() {
        let mut order = weekly(4, 2024);
        order.sunday = 2.5;

        let orders = generate_orders_for_month(&order);

        // April 2024 has four Sundays: 7, 14, 21, 28.
        assert_eq!(orders.len(), 4);
        for o in &orders {
            assert_eq!(o.quantity, 2.5);
            assert_eq!(o.order_date.day() % 7, 0);
        }
    }

    #[test]
    fn test_generate_orders_idempotent() {
        let mut order = weekly(2, 2024);
        order.monday = 2.0;
        order.friday = 0.5;

        let first = generate_orders_for_month(&order);
        let second = generate_orders_for_month(&order);
        assert_eq!(first, second);
    }

    #[test]
    fn test_milk_output_rounding_law() {
        use crate::commands::feed::{combined_milk_output, round1};

        assert_eq!(round1(2.34), 2.3);
        assert_eq!(round1(1.06), 1.1);
        assert_eq!(round1(2.5), 2.5);
        assert_eq!(round1(0.0), 0.0);

        // total = round1(round1(m) + round1(e))
        assert_eq!(combined_milk_output(Some(2.34), Some(1.06)), Some(3.4));
        assert_eq!(combined_milk_output(Some(3.0), Some(4.25)), Some(7.3));
        // Absent input counts as zero once the other side is recorded.
        assert_eq!(combined_milk_output(Some(2.0), None), Some(2.0));
        assert_eq!(combined_milk_output(None, Some(1.74)), Some(1.7));
        // Both absent means "not recorded".
        assert_eq!(combined_milk_output(None, None), None);
    }

    #[test]
    fn test_feed_draft_parsing() {
        use crate::commands::feed::FeedRecordDraft;

        let draft = FeedRecordDraft {
            record_date: Some("2024-05-10".to_string()),
            cow_id: Some("COW-ABC12345".to_string()),
            makai: Some("3.27".to_string()),
            ghau_bhusu: Some("".to_string()),
            milk_output_morning: Some("2.34".to_string()),
            milk_output_evening: Some("1.06".to_string()),
            ..Default::default()
        };

        let values = draft.parse().expect("draft should parse");
        assert_eq!(values.record_date, chrono::NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        // Quantities are rounded to one decimal at the boundary.
        assert_eq!(values.makai, Some(3.3));
        // Empty string means "not recorded", not zero.
        assert_eq!(values.ghau_bhusu, None);
        assert_eq!(values.tuver_bhusu, None);
        assert_eq!(values.milk_output_morning, Some(2.3));
        assert_eq!(values.milk_output_evening, Some(1.1));
        assert_eq!(values.milk_output, Some(3.4));
    }

    #[test]
    fn test_feed_draft_rejects_junk() {
        use crate::commands::feed::FeedRecordDraft;

        let draft = FeedRecordDraft {
            record_date: Some("2024-05-10".to_string()),
            saileg: Some("plenty".to_string()),
            ..Default::default()
        };
        assert!(draft.parse().is_err());

        // A missing record date is a validation failure, not a default.
        let draft = FeedRecordDraft::default();
        assert!(draft.parse().is_err());
    }

    #[test]
    fn test_date_parsing() {
        use crate::commands::order::utils::parse_date_safe;
        use chrono::NaiveDate;

        assert_eq!(
            parse_date_safe("2023-10-27"),
            Some(NaiveDate::from_ymd_opt(2023, 10, 27).unwrap())
        );
        assert_eq!(
            parse_date_safe("20231027"),
            Some(NaiveDate::from_ymd_opt(2023, 10, 27).unwrap())
        );
        assert_eq!(parse_date_safe("invalid"), None);
        assert_eq!(parse_date_safe(""), None);
    }

    #[test]
    fn test_order_status_validation() {
        use crate::commands::order::utils::validate_status;

        for status in ["pending", "processing", "completed", "cancelled"] {
            assert!(validate_status(status).is_ok());
        }
        assert!(validate_status("shipped").is_err());
        assert!(validate_status("").is_err());
    }

    fn order(name: &str, date: (i32, u32, u32), status: &str) -> crate::db::Order {
        crate::db::Order {
            id: crate::db::new_row_id("ORD"),
            customer_id: None,
            customer_name: name.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status: Some(status.to_string()),
            item: "Milk".to_string(),
            quantity: 1.0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_order_search_is_case_insensitive_substring() {
        use crate::commands::order::filter_orders;

        let orders = vec![
            order("Asha Patel", (2024, 3, 1), "pending"),
            order("Ramesh Shah", (2024, 3, 2), "pending"),
            order("Pratik Ashara", (2024, 3, 3), "pending"),
        ];

        let hits = filter_orders(orders, "ash");
        let names: Vec<_> = hits.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Asha Patel", "Ramesh Shah", "Pratik Ashara"]);

        let orders = vec![
            order("Asha Patel", (2024, 3, 1), "pending"),
            order("Ramesh Shah", (2024, 3, 2), "pending"),
        ];
        let hits = filter_orders(orders, "PATEL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Asha Patel");
    }

    #[test]
    fn test_order_sort_keys() {
        use crate::commands::order::{sort_orders, OrderSortKey};

        let mut orders = vec![
            order("Charu", (2024, 3, 5), "completed"),
            order("Asha", (2024, 3, 9), "pending"),
            order("Bhavin", (2024, 3, 1), "cancelled"),
        ];

        sort_orders(&mut orders, OrderSortKey::CustomerName, true);
        let names: Vec<_> = orders.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Bhavin", "Charu"]);

        sort_orders(&mut orders, OrderSortKey::OrderDate, false);
        assert_eq!(orders[0].order_date.day(), 9);
        assert_eq!(orders[2].order_date.day(), 1);

        sort_orders(&mut orders, OrderSortKey::Status, true);
        let statuses: Vec<_> = orders
            .iter()
            .map(|o| o.status.as_deref().unwrap())
            .collect();
        assert_eq!(statuses, vec!["cancelled", "completed", "pending"]);

        assert_eq!(OrderSortKey::parse("order_date"), Some(OrderSortKey::OrderDate));
        assert_eq!(OrderSortKey::parse("total_amount"), None);
    }

    fn feed_view(cow_name: Option<&str>, date: (i32, u32, u32), milk: Option<f64>) -> crate::db::FeedRecordView {
        crate::db::FeedRecordView {
            record: crate::db::FeedRecord {
                id: crate::db::new_row_id("FR"),
                cow_id: cow_name.map(|n| format!("COW-{}", n.to_uppercase())),
                record_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
                vaccine: None,
                deworming: None,
                disease: None,
                medical_note: None,
                grower_below_6_months: None,
                grower_above_6_months: None,
                tuver_bhusu: None,
                ghau_bhusu: None,
                chana_bhusu: None,
                juvar_bajari: None,
                sheradi_kucha: None,
                saileg: None,
                makai: None,
                bajari_juvar: None,
                bajari_sheradi: None,
                bajari_makai: None,
                vegetable_waste: None,
                kapas_khod: None,
                makai_khod: None,
                readymade_feed: None,
                milk_output_morning: None,
                milk_output_evening: None,
                milk_output: milk,
                created_at: None,
                updated_at: None,
            },
            cow_name: cow_name.map(|n| n.to_string()),
        }
    }

    #[test]
    fn test_feed_record_search_and_sort() {
        use crate::commands::feed::{search_feed_records, sort_feed_records, FeedSortKey};

        let records = vec![
            feed_view(Some("Ganga"), (2024, 5, 1), Some(8.0)),
            feed_view(Some("Gauri"), (2024, 5, 3), Some(6.5)),
            feed_view(None, (2024, 5, 2), Some(9.0)),
        ];

        // Records without an owning cow never match a search.
        let hits = search_feed_records(records, "ga");
        assert_eq!(hits.len(), 2);

        let mut records = vec![
            feed_view(Some("Ganga"), (2024, 5, 1), Some(8.0)),
            feed_view(Some("Gauri"), (2024, 5, 3), Some(6.5)),
            feed_view(Some("Nandini"), (2024, 5, 2), Some(9.0)),
        ];

        sort_feed_records(&mut records, FeedSortKey::MilkOutput, false);
        assert_eq!(records[0].cow_name.as_deref(), Some("Nandini"));
        assert_eq!(records[2].cow_name.as_deref(), Some("Gauri"));

        sort_feed_records(&mut records, FeedSortKey::RecordDate, true);
        assert_eq!(records[0].record.record_date.unwrap().day(), 1);
        assert_eq!(records[2].record.record_date.unwrap().day(), 3);
    }

    #[test]
    fn test_feed_record_filter_by_cow() {
        use crate::commands::feed::filter_feed_records_by_cow;

        let records = vec![
            feed_view(Some("Ganga"), (2024, 5, 1), None),
            feed_view(Some("Gauri"), (2024, 5, 3), None),
        ];

        let hits = filter_feed_records_by_cow(records, "COW-GANGA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].cow_name.as_deref(), Some("Ganga"));
    }
}
