use criterion::{Criterion, criterion_group, criterion_main};
use mdlint_bridge::config::{ConfigResolver, ConfigSource, RuleMap, RuleSetting};
use mdlint_bridge::types::{DeleteCount, FixDescriptor, LintFinding};
use mdlint_bridge::{apply_all_fixes, map_findings};
use std::hint::black_box;

fn generate_fixable_md() -> (String, Vec<LintFinding>) {
    let mut content = String::with_capacity(40_000);
    let mut findings = Vec::new();
    content.push_str("# Large Document\n\n");
    let mut line_number = 2;

    for i in 0..500 {
        let line = format!("Line {} with trailing whitespace   ", i);
        line_number += 1;
        findings.push(LintFinding {
            line_number,
            rule_names: vec!["MD009".to_string(), "no-trailing-spaces".to_string()],
            rule_description: "Trailing spaces".to_string(),
            error_detail: Some("Expected: 0 or 2; Actual: 3".to_string()),
            error_range: Some((line.len() - 2, 3)),
            fix_info: Some(FixDescriptor {
                edit_column: line.len() - 2,
                delete_count: DeleteCount::Chars(3),
                ..Default::default()
            }),
            ..Default::default()
        });
        content.push_str(&line);
        content.push('\n');

        if i % 10 == 0 {
            line_number += 1;
            findings.push(LintFinding {
                line_number,
                rule_names: vec!["MD018".to_string(), "no-missing-space-atx".to_string()],
                rule_description: "No space after hash on atx style heading".to_string(),
                error_range: Some((1, 3)),
                fix_info: Some(FixDescriptor {
                    edit_column: 3,
                    insert_text: Some(" ".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            });
            content.push_str(&format!("##Section {}\n", i));
        }
    }
    (content, findings)
}

fn bench_apply_all_fixes(c: &mut Criterion) {
    let (content, findings) = generate_fixable_md();
    c.bench_function("apply_all_fixes", |b| {
        b.iter(|| black_box(apply_all_fixes(&content, &findings)))
    });
}

fn bench_map_findings(c: &mut Criterion) {
    let (_, findings) = generate_fixable_md();
    c.bench_function("map_findings", |b| {
        b.iter(|| black_box(map_findings(&findings)))
    });
}

fn bench_resolve_config(c: &mut Criterion) {
    let sources: Vec<ConfigSource> = (0..5)
        .map(|layer| {
            let rules: RuleMap = (1..=50)
                .map(|rule| {
                    let setting = if (rule + layer) % 3 == 0 {
                        RuleSetting::Enabled(false)
                    } else {
                        RuleSetting::from(serde_json::json!({"level": layer}))
                    };
                    (format!("MD{:03}", rule), setting)
                })
                .collect();
            ConfigSource::Settings(rules)
        })
        .collect();
    let resolver = ConfigResolver::new();
    c.bench_function("resolve_config", |b| {
        b.iter(|| black_box(resolver.resolve(&sources)))
    });
}

criterion_group!(
    benches,
    bench_apply_all_fixes,
    bench_map_findings,
    bench_resolve_config,
);
criterion_main!(benches);
