use std::fs;

use tyexpr::{
    BooleanExpression, Context, DoubleExpression, EvalError, Expression, IntExpression,
    MapContext, ParseConfig, ParseError, Value, ValueType, parse_boolean_expression,
    parse_double_expression, parse_int_expression, parse_int_expression_with_config,
    parse_long_expression,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = check(&code) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```tyexpr") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// The variables every example and assertion below is evaluated against.
fn sample_context() -> MapContext {
    let address = MapContext::new().with("city", "Oslo").with("zip", 150);
    let person = MapContext::new().with("name", "Sarah")
                                  .with("age", 25)
                                  .with_nested("address", address);

    MapContext::new().with("age", 25)
                     .with("salary", 50_000)
                     .with("balance", 12_000_000_000_i64)
                     .with("rate", 0.25)
                     .with("name", "Sarah")
                     .with("active", true)
                     .with("joined", instant("2016-02-29T00:00:00.000Z"))
                     .with_nested("person", person)
}

fn instant(text: &str) -> Value {
    let value: Value = text.parse().unwrap();
    assert_eq!(value.value_type(), ValueType::Instant);
    value
}

/// Parses `src` as a boolean expression and requires it to be true.
fn check(src: &str) -> Result<(), String> {
    let expression = parse_boolean_expression(src).map_err(|e| e.to_string())?;
    match expression.resolve(&sample_context()) {
        Ok(true) => Ok(()),
        Ok(false) => Err(format!("'{src}' evaluated to false")),
        Err(e) => Err(e.to_string()),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = check(src) {
        panic!("Expression failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if parse_boolean_expression(src).is_ok() {
        panic!("Expression '{src}' parsed but was expected to fail")
    }
}

fn int(src: &str) -> Result<i32, EvalError> {
    parse_int_expression(src).unwrap().resolve(&sample_context())
}

#[test]
fn arithmetic_precedence() {
    let expression = parse_int_expression("4+1*2").unwrap();
    let expected: IntExpression =
        Expression::constant(4) + Expression::constant(1) * Expression::constant(2);

    assert_eq!(expression, expected);
    assert_eq!(expression.evaluate(), Ok(6));
    assert_eq!(int("3*((1+2)*(5+1))"), Ok(54));
    assert_eq!(int("10 - 4 - 3"), Ok(3));
    assert_eq!(int("100 / 10 / 5"), Ok(2));
}

#[test]
fn division_per_type() {
    let ints: IntExpression = Expression::constant(20) / Expression::constant(10);
    let doubles: DoubleExpression = Expression::constant(7.0) / Expression::constant(2.0);

    assert_eq!(ints.evaluate(), Ok(2));
    assert_eq!(doubles.evaluate(), Ok(3.5));
    assert_eq!(int("7 / 2"), Ok(3));
    assert_eq!(int("-7 / 2"), Ok(-3));
    assert_eq!(parse_double_expression("1.0 / 0.0").unwrap().evaluate(),
               Ok(f64::INFINITY));
}

#[test]
fn integer_failures_are_errors() {
    assert_eq!(int("1 / 0"),
               Err(EvalError::DivisionByZero { value_type: ValueType::Int }));
    assert!(matches!(int("2147483647 + 1"), Err(EvalError::Overflow { .. })));
    assert!(matches!(int("-2147483648 / -1"), Err(EvalError::Overflow { .. })));
    assert!(matches!(parse_long_expression("9223372036854775807L * 2L").unwrap().evaluate(),
                     Err(EvalError::Overflow { .. })));
}

#[test]
fn literal_forms_are_typed() {
    assert_eq!(parse_long_expression("3000000000L").unwrap().evaluate(),
               Ok(3_000_000_000));
    assert_eq!(parse_long_expression("7l / 2L").unwrap().evaluate(), Ok(3));
    assert!(matches!(parse_int_expression("3000000000"),
                     Err(ParseError::LiteralTooLarge { offset: 0, .. })));
    assert!(parse_int_expression("1L").is_err());
    assert!(parse_int_expression("1.5").is_err());
    assert!(parse_double_expression("1").is_err());
    assert!(parse_long_expression("1.0").is_err());
}

#[test]
fn relational_with_variables() {
    let rule = parse_boolean_expression("age >= 19").unwrap();

    assert_eq!(rule.resolve(&MapContext::new().with("age", 19)), Ok(true));
    assert_eq!(rule.resolve(&MapContext::new().with("age", 18)), Ok(false));

    assert_success("age > 19 && salary > 40000");
    assert_success("balance > 10000000000L");
    assert_success("rate * 4.0 == 1.0");
    assert_success("name == \"Sarah\"");
    assert_success("name < \"Tom\" && name != \"sarah\"");
    assert_success("age - 5 == 20");
}

#[test]
fn logical_operators_bind_equally() {
    assert_eq!(parse_boolean_expression("true || false && false").unwrap().evaluate(),
               Ok(false));
    assert_eq!(parse_boolean_expression("true || (false && false)").unwrap().evaluate(),
               Ok(true));
    assert_success("active && age > 19");
    assert_success("(age > 30 || salary > 40000) && active");
}

#[test]
fn logical_operators_short_circuit() {
    let context = sample_context();
    let resolve = |src: &str| parse_boolean_expression(src).unwrap().resolve(&context);

    assert_eq!(resolve("false && missing > 1"), Ok(false));
    assert_eq!(resolve("true || missing > 1"), Ok(true));
    assert_eq!(resolve("true && missing > 1"),
               Err(EvalError::VariableNotFound { name:    "missing".to_string(),
                                                 missing: "missing".to_string(), }));
    assert!(resolve("false || missing > 1").is_err());
}

#[test]
fn date_literals_follow_the_calendar() {
    assert_success("joined == 2016-02-29T00:00:00.000Z");
    assert_success("joined < 2016-03-01T00:00:00.000Z");
    assert!(parse_boolean_expression("joined > 2000-02-29T23:59:59.999Z").is_ok());

    for invalid in ["2015-02-29T00:00:00.000Z",
                    "2015-04-31T00:00:00.000Z",
                    "1900-02-29T00:00:00.000Z",
                    "2016-13-01T00:00:00.000Z",
                    "2016-01-01T24:00:00.000Z",
                    "2016-01-01T00:60:00.000Z",
                    "2016-01-01T00:00:60.000Z"]
    {
        let source = format!("joined > {invalid}");
        assert!(matches!(parse_boolean_expression(&source),
                         Err(ParseError::InvalidDateTime { offset: 9, .. })),
                "{invalid} should be rejected");
    }

    for millis in ["2016-01-01T00:00:00.00Z", "2016-01-01T00:00:00.0000Z"] {
        let source = format!("joined > {millis}");
        assert!(matches!(parse_boolean_expression(&source),
                         Err(ParseError::InvalidToken { .. })),
                "{millis} should be rejected");
    }
}

#[test]
fn nested_variables() {
    let context =
        MapContext::new().with_nested("a",
                                      MapContext::new().with_nested("b",
                                                                    MapContext::new().with("c", 5)));
    let expression = parse_int_expression("a.b.c").unwrap();

    assert_eq!(expression.resolve(&context), Ok(5));

    let shallow = MapContext::new().with_nested("a", MapContext::new().with_nested("b", MapContext::new()));
    assert_eq!(expression.resolve(&shallow),
               Err(EvalError::VariableNotFound { name:    "a.b.c".to_string(),
                                                 missing: "c".to_string(), }));

    let no_b = MapContext::new().with_nested("a", MapContext::new());
    assert_eq!(expression.resolve(&no_b),
               Err(EvalError::VariableNotFound { name:    "a.b.c".to_string(),
                                                 missing: "b".to_string(), }));

    assert_success("person.address.city == \"Oslo\" && person.address.zip * 2 == 300");
    assert_success("person.name == name");
}

#[test]
fn wrong_variable_type_is_an_error() {
    let context = MapContext::new().with("age", "19");

    assert_eq!(parse_boolean_expression("age == 19").unwrap().resolve(&context),
               Err(EvalError::TypeMismatch { name:     "age".to_string(),
                                             expected: ValueType::Int,
                                             found:    ValueType::String, }));
}

#[test]
fn constructed_trees_match_parsed_ones() {
    let sum: IntExpression = Expression::constant(10) + Expression::constant(5);
    assert_eq!(sum.evaluate(), Ok(15));
    assert_eq!(parse_int_expression("10 + 5").unwrap(), sum);

    let rule: BooleanExpression =
        Expression::<i32>::variable("age").greater_than(Expression::constant(19))
        & Expression::<i32>::variable("salary").greater_than(Expression::constant(40_000));
    assert_eq!(parse_boolean_expression("age > 19 && salary > 40000").unwrap(), rule);
    assert_eq!(rule.resolve(&sample_context()), Ok(true));
}

#[test]
fn two_variables_compare_as_strings() {
    let parsed = parse_boolean_expression("a == b").unwrap();
    let expected = Expression::<String>::variable("a").equals(Expression::variable("b"));
    assert_eq!(parsed, expected);

    let strings = MapContext::new().with("a", "x").with("b", "x");
    let ints = MapContext::new().with("a", 1).with("b", 1);
    assert_eq!(parsed.resolve(&strings), Ok(true));
    assert!(matches!(parsed.resolve(&ints),
                     Err(EvalError::TypeMismatch { expected: ValueType::String,
                                                   found: ValueType::Int,
                                                   .. })));

    // An arithmetic operator settles the type.
    assert_eq!(parse_boolean_expression("a + 0 == b").unwrap().resolve(&ints),
               Ok(true));
}

#[test]
fn mismatched_operand_types_fail_to_parse() {
    assert_failure("\"Sarah\" == 19");
    assert_failure("19 == \"Sarah\"");
    assert_failure("1 == 1L");
    assert_failure("1.0 < 2");
    assert_failure("2016-02-29T00:00:00.000Z > 5");
    assert_failure("age + 1.5 > 2");
    assert_failure("\"a\" + \"b\" == name");
}

#[test]
fn failed_alternatives_are_traced() {
    let error = parse_boolean_expression("\"Sarah\" == 19").unwrap_err();

    assert!(matches!(error, ParseError::NoMatchingAlternative { .. }));
    for label in ["comparison > string: ",
                  "comparison > date-time: ",
                  "comparison > int: ",
                  "comparison > long: ",
                  "comparison > double: ",
                  "parenthesized: ",
                  "boolean literal: ",
                  "boolean variable: "]
    {
        assert!(error.trace().iter().any(|line| line.starts_with(label)),
                "missing trace line for {label}: {:?}",
                error.trace());
    }
    assert_eq!(error.offset(), 11);
}

#[test]
fn incomplete_input_reports_offsets() {
    assert!(matches!(parse_int_expression("1 + 2 3"),
                     Err(ParseError::UnexpectedTrailingTokens { offset: 6, .. })));
    assert!(matches!(parse_int_expression("1 + 2)"),
                     Err(ParseError::UnexpectedTrailingTokens { offset: 5, .. })));
    assert!(matches!(parse_int_expression("(1 + 2"),
                     Err(ParseError::UnexpectedEndOfInput { offset: 6, .. })));
    assert!(matches!(parse_int_expression("1 + * 2"),
                     Err(ParseError::UnexpectedToken { offset: 4, .. })));
    assert!(matches!(parse_boolean_expression("age > 1 )"),
                     Err(ParseError::UnexpectedTrailingTokens { offset: 8, .. })));
    assert_eq!(parse_boolean_expression("(age >= 19").unwrap_err().offset(), 10);
    assert!(matches!(parse_int_expression("1 # 2"),
                     Err(ParseError::InvalidToken { offset: 2, .. })));
    assert!(matches!(parse_int_expression(""),
                     Err(ParseError::UnexpectedEndOfInput { offset: 0, .. })));
}

#[test]
fn nesting_depth_is_limited() {
    let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse_int_expression(&nested(64)).unwrap().evaluate(), Ok(1));
    assert_eq!(parse_int_expression(&nested(65)),
               Err(ParseError::NestingTooDeep { max: 64, offset: 64 }));

    let config = ParseConfig::default().with_max_nesting_depth(200);
    assert!(parse_int_expression_with_config(&nested(200), &config).is_ok());
}

#[test]
fn display_round_trips() {
    for source in ["4+1*2",
                   "3*((1+2)*(5+1))",
                   "-3 - -2 * person.age",
                   "2147483647 / -1"]
    {
        let expression = parse_int_expression(source).unwrap();
        assert_eq!(parse_int_expression(&expression.to_string()), Ok(expression));
    }

    for source in ["age >= 19 && salary > 40000 || active",
                   "(name == \"Sa\\\"rah\\n\") && joined < 2016-03-01T12:30:00.250Z",
                   "balance / 2L > 1L || rate * 2.5 <= 0.0000001",
                   "person.name == name",
                   "true && (false || (1 < 2))"]
    {
        let expression = parse_boolean_expression(source).unwrap();
        let printed = expression.to_string();
        assert_eq!(parse_boolean_expression(&printed), Ok(expression), "{printed}");
    }

    let doubles = parse_double_expression("1.5 * 2.0 - 100.25").unwrap();
    assert_eq!(doubles.to_string(), "((1.5 * 2.0) - 100.25)");

    let smallest = Expression::<i64>::constant(i64::MIN);
    assert_eq!(smallest.to_string(), "-9223372036854775808L");
    assert_eq!(parse_long_expression(&smallest.to_string()), Ok(smallest));

    // Non-finite doubles have no literal form; `inf` reads back as a variable.
    let infinite = Expression::<f64>::constant(f64::INFINITY);
    assert_eq!(infinite.to_string(), "inf");
    assert_eq!(parse_double_expression(&infinite.to_string()), Ok(Expression::variable("inf")));
}

#[test]
fn whitespace_is_insignificant() {
    assert_success("  age\n>=\t19 &&\r\nname==\"Sarah\"  ");
    assert_eq!(int("  ( 1+2 ) *3 "), Ok(9));
}

#[test]
fn hosts_can_supply_their_own_context() {
    struct Employee {
        name:   String,
        salary: i64,
    }

    impl Context for Employee {
        fn get(&self, field: &str) -> Option<Value> {
            match field {
                "name" => Some(Value::from(self.name.as_str())),
                "salary" => Some(Value::from(self.salary)),
                _ => None,
            }
        }

        fn nested(&self, _: &str) -> Option<&dyn Context> {
            None
        }
    }

    let rule = parse_boolean_expression("salary >= 40000L && name != \"Bob\"").unwrap();

    assert_eq!(rule.resolve(&Employee { name:   "Sarah".to_string(),
                                        salary: 50_000, }),
               Ok(true));
    assert_eq!(rule.resolve(&Employee { name:   "Bob".to_string(),
                                        salary: 50_000, }),
               Ok(false));
}

#[test]
fn value_literals_parse() {
    assert_eq!("19".parse::<Value>(), Ok(Value::Int(19)));
    assert_eq!("4000000000".parse::<Value>(), Ok(Value::Long(4_000_000_000)));
    assert_eq!("-9223372036854775808L".parse::<Value>(), Ok(Value::Long(i64::MIN)));
    assert_eq!("9223372036854775808L".parse::<Value>(),
               Ok(Value::from("9223372036854775808L")));
    assert_eq!("true".parse::<Value>(), Ok(Value::Bool(true)));
    assert_eq!("Oslo".parse::<Value>(), Ok(Value::from("Oslo")));
    assert_eq!(Value::from(2.5).to_string(), "2.5");
}

#[test]
fn example_script_works() {
    let contents = fs::read_to_string("tests/examples.expr").unwrap();
    let mut count = 0;

    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        count += 1;
        if let Err(e) = check(line) {
            panic!("Line {} of tests/examples.expr failed: {line}\nError: {e}", number + 1);
        }
    }

    assert!(count > 0, "No expressions found in tests/examples.expr");
}
