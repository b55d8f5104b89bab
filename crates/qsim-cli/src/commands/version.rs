//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - exact statevector simulation of quantum circuits",
        style("Qsim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsim-ir      Circuit model and description format");
    println!("  qsim-engine  Statevector evolution and measurement");
    println!("  qsim-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/qsim-lab/qsim").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
