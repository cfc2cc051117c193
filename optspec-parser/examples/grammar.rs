use core::panic;

use optspec_parser::{Grammar, ParsedArgs, Tokens};

struct MyArgs {
    output: u32,
    verbose: bool,
}

fn main() {
    let argv = &["-o", "42", "-v"];

    let grammar: Grammar = match Grammar::compile("o:[v]{x|y}") {
        Ok(grammar) => grammar,
        Err(err) => panic!("{err}"),
    };

    let tokens = Tokens::new(argv);
    let res: Result<ParsedArgs<'_, 4>, _> = ParsedArgs::try_parse(tokens, &grammar);

    // Neither -x nor -y has been given.
    if res.is_ok() {
        panic!("arguments should be rejected");
    }

    let argv = &["-o", "42", "-v", "-x"];

    let tokens = Tokens::new(argv);
    let parsed: ParsedArgs<'_, 4> = match ParsedArgs::try_parse(tokens, &grammar) {
        Ok(parsed) => parsed,
        Err(err) => panic!("{err}"),
    };

    let args = MyArgs {
        output: parsed
            .try_get_one('o')
            .expect("must be parsed")
            .expect("must be present"),
        verbose: parsed.contains('v'),
    };

    if 42 != args.output {
        panic!("invalid output");
    }

    if !args.verbose {
        panic!("invalid verbose");
    }
}
