#[cfg(test)]
mod tests {
    use ksql::{
        and, create, describe, field, insert, list, or, raw, select, Expression,
        ExpressionRef, Format, Kind, Metadata, Reference, Row, SearchField,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use test_utils::init_test_logger;

    #[test]
    fn create_stream_with_field_list() {
        init_test_logger();
        let stmt = create(Reference::Stream, "ORDERS")
            .with_schema_fields([
                SearchField::new("ID", Kind::Int),
                SearchField::new("AMOUNT", Kind::Bytes),
            ])
            .render()
            .expect("valid CREATE");
        assert!(stmt.contains("CREATE STREAM ORDERS (ID INT, AMOUNT BYTES) "));
    }

    #[test]
    fn describe_topic() {
        let stmt = describe(Reference::Topic, "ORDERS_TOPIC").render();
        assert_eq!(stmt.as_deref(), Some("DESCRIBE TOPIC ORDERS_TOPIC"));
    }

    #[test]
    fn and_joins_three_children() {
        let stmt = ksql::and![raw("a"), raw("b"), raw("c")].render();
        assert_eq!(stmt.as_deref(), Some("a AND b AND c"));

        let same = and(
            ["a", "b", "c"].map(|text| Arc::new(raw(text)) as ExpressionRef),
        );
        assert_eq!(same.render(), stmt);
    }

    #[test]
    fn create_with_nothing_is_rejected() {
        init_test_logger();
        assert_eq!(create(Reference::Stream, "X").render(), None);
    }

    #[test]
    fn builders_nest_as_expressions() {
        let filter = ksql::or![
            field("STATUS").equal("open"),
            ksql::and![field("AMOUNT").greater(100), field("REGION").is_not_null()],
        ];
        let query = select([field("ID"), field("AMOUNT")])
            .from("ORDERS", Reference::Stream)
            .where_clause(filter)
            .emit_changes();

        let stmt = create(Reference::Table, "BIG_ORDERS")
            .with_metadata(
                Metadata::new()
                    .kafka_topic("big-orders")
                    .value_format(Format::Avro)
                    .partitions(6),
            )
            .with_as_select(query)
            .render();

        assert_eq!(
            stmt.as_deref(),
            Some(
                "CREATE TABLE BIG_ORDERS \
                 WITH (KAFKA_TOPIC='big-orders', VALUE_FORMAT='AVRO', PARTITIONS=6) \
                 AS SELECT ID, AMOUNT FROM ORDERS \
                 WHERE STATUS = 'open' OR (AMOUNT > 100 AND REGION IS NOT NULL) EMIT CHANGES"
            )
        );
    }

    #[test]
    fn failure_deep_in_the_tree_reaches_the_top() {
        let query = select([])
            .from("ORDERS", Reference::Stream)
            .where_clause(ksql::and![field("A").equal(1), or([])]);
        let stmt = create(Reference::Stream, "COPY").with_as_select(query);
        assert_eq!(stmt.render(), None);

        let insert_stmt = insert(Reference::Stream, "COPY").as_select(
            select([field("")]).from("ORDERS", Reference::Stream),
        );
        assert_eq!(insert_stmt.render(), None);
    }

    #[test]
    fn statement_lifecycle() {
        let statements: Vec<Box<dyn Expression>> = vec![
            Box::new(
                create(Reference::Stream, "PINGS")
                    .with_schema_fields([SearchField::new("HOST", Kind::Varchar)])
                    .with_metadata(Metadata::new().kafka_topic("pings")),
            ),
            Box::new(insert(Reference::Stream, "PINGS").values(Row::new().set("HOST", "db-1"))),
            Box::new(list(Reference::Stream)),
            Box::new(describe(Reference::Stream, "PINGS")),
            Box::new(ksql::drop::drop(Reference::Stream, "PINGS").if_exists().delete_topic()),
        ];

        let rendered = statements
            .iter()
            .map(|stmt| stmt.render())
            .collect::<Option<Vec<_>>>()
            .expect("every statement renders");

        assert_eq!(
            rendered,
            vec![
                "CREATE STREAM PINGS (HOST VARCHAR) WITH (KAFKA_TOPIC='pings') ",
                "INSERT INTO PINGS (HOST) VALUES ('db-1')",
                "LIST STREAMS",
                "DESCRIBE STREAM PINGS",
                "DROP STREAM IF EXISTS PINGS DELETE TOPIC",
            ]
        );
    }
}
