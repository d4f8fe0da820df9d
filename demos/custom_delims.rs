//! Lex with custom delimiters and comment tokens enabled.

use template_lexer::{LexConfig, format, lex};

fn main() {
    let input = "Hi <%/* greeting */%><%- $user -%> !\n";

    let lexed = lex(
        LexConfig::new("custom", input)
            .delims("<%", "%>")
            .emit_comments(true),
    );

    for token in &lexed.tokens {
        println!("{:>10} {:?}", token.kind.to_string(), token.value);
    }
    println!("\nDisplay form: {}", format(&lexed.tokens));
}
