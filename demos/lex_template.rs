//! Lex a small HTML template and print its tokens.

use template_lexer::{LexConfig, TokenKind, dump, lex};

fn main() {
    let input = "\
<h1>Welcome Home, {{ .Name.First }}</h1>
<h3>Here are your tasks for today</h3>
{{ range .Tasks }}
  <p>{{- .Name -}}: {{ if $done }}done{{ end }}</p>
{{ end }}
";

    let lexed = lex(LexConfig::new("home", input));

    let actions = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::LeftDelim)
        .count();
    println!("Actions: {actions}");
    for token in lexed.tokens.iter().filter(|t| t.kind.is_keyword()) {
        println!("  Keyword {token} on line {}", token.span.line);
    }

    println!("\nTokens:\n{}", dump(&lexed.tokens));
    println!("Display form:\n{lexed}");
}
