use csvnote::data::io_csv::from_csv_str;
use csvnote::data::parse_line;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn quote_free_lines_split_on_every_comma(
        fields in prop::collection::vec(proptest_helpers::arb_plain_field(), 1..8)
    ) {
        let line = fields.join(",");
        let expected: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();

        prop_assert_eq!(parse_line(&line), expected);
    }

    #[test]
    fn quoted_comma_does_not_split(
        plain in prop::collection::vec("[a-z0-9]{0,4}", 1..5),
        left in "[^,\"\r\n]{0,5}",
        right in "[^,\"\r\n]{0,5}",
    ) {
        let inner = format!("{},{}", left, right);
        let line = format!("{},\"{}\"", plain.join(","), inner);
        let fields = parse_line(&line);

        prop_assert_eq!(fields.len(), plain.len() + 1);
        prop_assert_eq!(fields.last().unwrap(), inner.trim());
    }

    #[test]
    fn every_line_yields_at_least_one_field(line in "[^\r\n]{0,40}") {
        prop_assert!(!parse_line(&line).is_empty());
    }

    #[test]
    fn quotes_never_survive(line in "[^\r\n]{0,40}") {
        prop_assert!(parse_line(&line).iter().all(|f| !f.contains('"')));
    }

    #[test]
    fn blank_lines_count_toward_nothing(
        header in proptest_helpers::arb_plain_line(),
        rows in prop::collection::vec(proptest_helpers::arb_plain_line(), 0..20),
        blanks in prop::collection::vec(0usize..3, 21),
    ) {
        let mut text = "\n".repeat(blanks[0]);
        text.push_str(&header);
        text.push('\n');
        for (i, row) in rows.iter().enumerate() {
            text.push_str(&"\r\n".repeat(blanks[i + 1]));
            text.push_str(row);
            text.push('\n');
        }

        let dataset = from_csv_str(&text);
        prop_assert_eq!(dataset.headers, parse_line(&header));
        prop_assert_eq!(dataset.rows.len(), rows.len());
    }
}
