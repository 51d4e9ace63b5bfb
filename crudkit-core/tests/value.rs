#[cfg(test)]
mod tests {
    use crudkit_core::{AsValue, Json, Value};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use std::str::FromStr;
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, macros::datetime};
    use uuid::Uuid;

    #[test]
    fn integers() {
        assert_eq!(42i32.as_value(), Value::Int32(Some(42)));
        assert_eq!(7u8.as_value(), Value::Int16(Some(7)));
        assert_eq!(i64::try_from_value(Value::Int16(Some(-3))).unwrap(), -3);
        assert_eq!(i16::try_from_value(Value::Int64(Some(300))).unwrap(), 300);
        assert!(i16::try_from_value(Value::Int64(Some(70_000))).is_err());
        assert!(u32::try_from_value(Value::Int32(Some(-1))).is_err());
        assert_eq!(i32::try_from_value(Value::Varchar(Some(" 12 ".into()))).unwrap(), 12);
        assert_eq!(
            i64::try_from_value(Value::Decimal(Some(Decimal::from(9)))).unwrap(),
            9
        );
        assert!(i64::try_from_value(Value::Decimal(Some(Decimal::from_str("1.5").unwrap()))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("abc".into()))).is_err());
    }

    #[test]
    fn nullable() {
        assert_eq!(None::<i32>.as_value(), Value::Int32(None));
        assert_eq!(Option::<String>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value(Value::Varchar(Some("a".into()))).unwrap(),
            Some("a".to_string())
        );
        assert!(String::try_from_value(Value::Null).is_err());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some("".into())).is_null());
    }

    #[test]
    fn textual() {
        assert_eq!(
            Date::try_from_value(Value::Varchar(Some("2024-02-29".into()))).unwrap(),
            Date::from_calendar_date(2024, Month::February, 29).unwrap()
        );
        assert_eq!(
            Time::try_from_value(Value::Varchar(Some("10:20:30".into()))).unwrap(),
            Time::from_hms(10, 20, 30).unwrap()
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Varchar(Some(
                "2020-01-02 03:04:05.5".into()
            )))
            .unwrap(),
            datetime!(2020-01-02 03:04:05.5)
        );
        assert_eq!(
            OffsetDateTime::try_from_value(Value::Varchar(Some(
                "2020-01-02T03:04:05+02:00".into()
            )))
            .unwrap(),
            datetime!(2020-01-02 03:04:05 +2)
        );
        let id = Uuid::from_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(id.to_string()))).unwrap(),
            id
        );
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some("12.75".into()))).unwrap(),
            Decimal::from_str("12.75").unwrap()
        );
        assert!(bool::try_from_value(Value::Int64(Some(1))).unwrap());
    }

    #[test]
    fn sequences() {
        let value = vec![1i64, 2, 3].as_value();
        assert_eq!(
            value,
            Value::List(
                Some(vec![
                    Value::Int64(Some(1)),
                    Value::Int64(Some(2)),
                    Value::Int64(Some(3))
                ]),
                Box::new(Value::Int64(None)),
            )
        );
        assert_eq!(Vec::<i64>::try_from_value(value.clone()).unwrap(), [1, 2, 3]);
        assert_eq!(<[i64; 3]>::try_from_value(value.clone()).unwrap(), [1, 2, 3]);
        assert!(<[i64; 2]>::try_from_value(value).is_err());
        assert_eq!(
            Vec::<String>::as_empty_value(),
            Value::List(None, Box::new(Value::Varchar(None)))
        );
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        size: u32,
    }

    #[test]
    fn json() {
        let settings = Json(Settings {
            theme: "dark".into(),
            size: 3,
        });
        let value = settings.clone().as_value();
        assert_eq!(
            value,
            Value::Json(Some(serde_json::json!({"theme": "dark", "size": 3})))
        );
        assert_eq!(Json::<Settings>::try_from_value(value).unwrap(), settings);
        assert_eq!(
            Json::<Settings>::try_from_value(Value::Varchar(Some(
                r#"{"theme":"light","size":1}"#.into()
            )))
            .unwrap()
            .theme,
            "light"
        );
    }

    #[test]
    fn try_as() {
        assert_eq!(
            Value::Int64(Some(5)).try_as(&Value::Int32(None)).unwrap(),
            Value::Int32(Some(5))
        );
        assert_eq!(
            Value::Null.try_as(&Value::Varchar(None)).unwrap(),
            Value::Varchar(None)
        );
        assert_eq!(
            Value::Json(Some(serde_json::json!([1]))).try_as(&Value::Varchar(None)).unwrap(),
            Value::Varchar(Some("[1]".into()))
        );
        assert_eq!(
            Value::List(Some(vec![Value::Int64(Some(1))]), Box::new(Value::Int64(None)))
                .try_as(&Value::List(None, Box::new(Value::Int32(None))))
                .unwrap(),
            Value::List(Some(vec![Value::Int32(Some(1))]), Box::new(Value::Int32(None)))
        );
        assert!(
            Value::Varchar(Some("x".into()))
                .try_as(&Value::Int32(None))
                .is_err()
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it''s'");
        assert_eq!(Value::Int32(None).to_string(), "NULL");
        assert_eq!(
            vec![1i16, 2].as_value().to_string(),
            "[1, 2]"
        );
    }
}
