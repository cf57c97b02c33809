//! Methods command - lists the registered comparison transforms.

use anyhow::Result;
use imgcmp_ops::registry::{self, Registry};

pub fn run(verbose: bool) -> Result<()> {
    for name in Registry::builtin().names() {
        if verbose {
            println!("{name:<18} {}", describe(name));
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn describe(name: &str) -> &'static str {
    match name {
        registry::BLEND => "(1 - alpha) * A + alpha * B",
        registry::DIFF => "A - B (alpha ignored)",
        registry::HORIZONTAL_SHADE => "top alpha of the rows from A, the rest from B",
        registry::VERTICAL_SHADE => "left alpha of the columns from A, the rest from B",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_method_described() {
        for name in Registry::builtin().names() {
            assert!(!describe(name).is_empty(), "{name}");
        }
    }
}
