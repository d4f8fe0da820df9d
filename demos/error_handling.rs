//! Demonstrate error handling for malformed templates.

use template_lexer::{LexConfig, lex, tokenize};

fn main() {
    // Unterminated quoted string
    match tokenize("<p>{{ printf \"unclosed }}</p>") {
        Ok(_) => println!("Lexed OK (unexpected)"),
        Err(e) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, position {}", e.span.line, e.span.position);
        }
    }

    println!();

    // Unbalanced parenthesis: the stream still ends in one error token
    let lexed = lex(LexConfig::new("parens", "{{ (len .Items }}"));
    if let Some(e) = lexed.error() {
        println!("Lex error: {e}");
    }
    if let Some(last) = lexed.tokens.last() {
        println!("  Last token: {:?} {:?}", last.kind, last.value);
    }
}
