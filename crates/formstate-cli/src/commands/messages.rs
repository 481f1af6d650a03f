use colored::Colorize;
use formstate::rules::default_template;
use formstate::ConstraintKind;

pub fn execute() {
    println!("{}", "Built-in messages".green().bold());
    println!();
    for kind in ConstraintKind::ALL {
        println!("  {} {}", format!("{:<10}", kind.as_str()).cyan(), default_template(kind));
    }
}
