use strictabc_output::OutputFormatter;

/// Run `strictabc explain <code>`: describe a finding code.
pub fn run(formatter: &dyn OutputFormatter, code: String) -> i32 {
    match strictabc_enforce::explain::explain(&code) {
        Some(result) => {
            let output = formatter.format_explain(&result);
            println!("{}", output.trim_end());
            0
        }
        None => {
            eprintln!(
                "strictabc explain: unknown code '{}' (known: {})",
                code,
                strictabc_enforce::explain::known_codes().join(", ")
            );
            2
        }
    }
}
