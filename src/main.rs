use std::{fmt::Display, fs, process};

use clap::{Parser, ValueEnum};
use tyexpr::{
    Expression, MapContext, Value, interpreter::value::core::Primitive, parse_boolean_expression,
    parse_double_expression, parse_int_expression, parse_long_expression,
};

/// tyexpr parses a typed expression, binds its variables, and prints the
/// result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tyexpr to read the expression from a file instead of the
    /// argument.
    #[arg(short, long)]
    file: bool,

    /// The result type the expression is parsed as.
    #[arg(short = 't', long = "type", value_enum, default_value_t = ResultType::Boolean)]
    result_type: ResultType,

    /// Binds a variable, as `name=value`. Dotted names bind nested values;
    /// the value is read as a literal, or as a string if it is none.
    #[arg(short, long = "var", value_parser = parse_binding)]
    vars: Vec<(String, Value)>,

    /// Prints the parsed tree, fully parenthesized, before the result.
    #[arg(long)]
    print_tree: bool,

    /// Logs parsing and evaluation at debug level on stderr.
    #[arg(long)]
    verbose: bool,

    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ResultType {
    Boolean,
    Int,
    Long,
    Double,
}

fn parse_binding(binding: &str) -> Result<(String, Value), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected name=value, found '{binding}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{binding}'"));
    }
    let Ok(value) = value.trim().parse::<Value>();
    Ok((name.to_string(), value))
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG)
                                 .with_writer(std::io::stderr)
                                 .init();
    }

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    let context: MapContext = args.vars.iter().cloned().collect();

    let outcome = match args.result_type {
        ResultType::Boolean => run(parse_boolean_expression(source.trim()), &context, args.print_tree),
        ResultType::Int => run(parse_int_expression(source.trim()), &context, args.print_tree),
        ResultType::Long => run(parse_long_expression(source.trim()), &context, args.print_tree),
        ResultType::Double => run(parse_double_expression(source.trim()), &context, args.print_tree),
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run<T, E>(parsed: Result<Expression<T>, E>,
             context: &MapContext,
             print_tree: bool)
             -> Result<(), Box<dyn std::error::Error>>
    where T: Primitive + Display,
          E: std::error::Error + 'static
{
    let expression = parsed?;
    if print_tree {
        println!("{expression}");
    }
    println!("{}", expression.resolve(context)?);
    Ok(())
}
