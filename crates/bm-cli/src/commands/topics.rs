use comfy_table::{ContentArrangement, Table};

use bm_core::Topic;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Quotients", "Divisors"]);

    for topic in Topic::catalog() {
        let rule = &topic.rule;
        table.add_row(vec![
            topic.key.clone(),
            topic.name.clone(),
            format!("{}-{}", rule.quotient.start(), rule.quotient.end()),
            format!("{}-{}", rule.divisor.start(), rule.divisor.end()),
        ]);
    }

    println!("{table}");
    Ok(())
}
