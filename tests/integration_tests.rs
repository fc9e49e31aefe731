use anyhow::Result;
use sales_report::core::report;
use sales_report::domain::ports::ConfigProvider;
use sales_report::{EtlEngine, LocalStorage, ReportError, RevenuePipeline, TomlConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = "ID;Nombre;Precio\n\n125;Sillas;10650\n178;Mesas;34950\n231;Bancos;59250\n284;Taladro;83550\n";

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sales_file(name: &str, national_id: i64, lines: &[&str]) -> String {
    let mut content = format!("{};{}\n\nid;producto;cantidad\n\n", name, national_id);
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// Lays out catalog, roster and sales files the way the fixture generator does.
fn seed_data_dir(dir: &Path) {
    write(dir, "productos.txt", CATALOG);
    write(
        dir,
        "vendedores.txt",
        "Nombre/Apellido;Cédula\n\nJuan Perez;32698401\nMaria Gonzalez;289486589\nPedro Rodriguez;546274777\nLuisa Martinez;803062965\n",
    );
    write(
        dir,
        "ventas/Juan Perez_ventas.txt",
        &sales_file("Juan Perez", 32698401, &["125;Sillas;3"]),
    );
    write(
        dir,
        "ventas/Maria Gonzalez_ventas.txt",
        &sales_file(
            "Maria Gonzalez",
            289486589,
            &["178;Mesas;2", "284;Taladro;1", "999;Desconocido;5", "231;Bancos;dos"],
        ),
    );
    write(
        dir,
        "ventas/Luisa Martinez_ventas.txt",
        &sales_file("Luisa Martinez", 803062965, &["125;Sillas;3"]),
    );
}

fn engine_for(dir: &Path) -> EtlEngine<RevenuePipeline<LocalStorage, TomlConfig>> {
    let storage = LocalStorage::new(dir);
    let pipeline = RevenuePipeline::new(storage, TomlConfig::default());
    EtlEngine::new(pipeline)
}

#[test]
fn test_end_to_end_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());

    let summary = engine_for(temp_dir.path()).run()?;

    assert_eq!(summary.report_path, temp_dir.path().join("reporte_ventas.txt"));
    assert_eq!(summary.catalog_size, 4);
    assert_eq!(summary.salespeople, 4);
    assert_eq!(summary.missing_sales_files, 1);
    assert_eq!(summary.unknown_products, 1);

    let content = fs::read_to_string(&summary.report_path)?;
    assert_eq!(
        content,
        "name;total\n\nMaria Gonzalez;153450\nJuan Perez;31950\nLuisa Martinez;31950\nPedro Rodriguez;0\n"
    );
    Ok(())
}

#[test]
fn test_single_salesperson_example() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write(temp_dir.path(), "productos.txt", "ID;Nombre;Precio\n\n125;Sillas;10650\n");
    write(temp_dir.path(), "vendedores.txt", "Nombre/Apellido;Cédula\n\nJuan Perez;32698401\n");
    write(
        temp_dir.path(),
        "ventas/Juan Perez_ventas.txt",
        &sales_file("Juan Perez", 32698401, &["125;Sillas;3"]),
    );

    let summary = engine_for(temp_dir.path()).run()?;
    let content = fs::read_to_string(summary.report_path)?;

    assert!(content.lines().any(|line| line == "Juan Perez;31950"));
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());

    let first_path = engine_for(temp_dir.path()).run()?.report_path;
    let first = fs::read(&first_path)?;
    let second_path = engine_for(temp_dir.path()).run()?.report_path;
    let second = fs::read(&second_path)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_sales_file_only_zeroes_that_salesperson() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());
    let with_file = fs::read_to_string(engine_for(temp_dir.path()).run()?.report_path)?;

    fs::remove_file(temp_dir.path().join("ventas/Juan Perez_ventas.txt"))?;
    let without_file = fs::read_to_string(engine_for(temp_dir.path()).run()?.report_path)?;

    assert!(with_file.contains("Juan Perez;31950\n"));
    assert!(without_file.contains("Juan Perez;0\n"));
    for name in ["Maria Gonzalez;153450", "Luisa Martinez;31950", "Pedro Rodriguez;0"] {
        assert!(with_file.contains(name));
        assert!(without_file.contains(name));
    }
    Ok(())
}

#[test]
fn test_report_is_sorted_with_name_tie_break() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());

    let content = fs::read_to_string(engine_for(temp_dir.path()).run()?.report_path)?;
    let rows: Vec<(String, i64)> = content
        .lines()
        .skip(2)
        .map(|line| {
            let (name, total) = line.rsplit_once(';').unwrap();
            (name.to_string(), total.parse().unwrap())
        })
        .collect();

    assert_eq!(rows.len(), 4);
    for pair in rows.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
        if pair[0].1 == pair[1].1 {
            assert!(pair[0].0 < pair[1].0);
        }
    }
    Ok(())
}

#[test]
fn test_missing_catalog_fails_without_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());
    fs::remove_file(temp_dir.path().join("productos.txt"))?;

    let result = engine_for(temp_dir.path()).run();

    assert!(matches!(result, Err(ReportError::MissingSource { .. })));
    assert!(!temp_dir.path().join("reporte_ventas.txt").exists());
    Ok(())
}

#[test]
fn test_empty_catalog_fails_and_keeps_previous_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());
    write(temp_dir.path(), "reporte_ventas.txt", "previous run\n");
    write(temp_dir.path(), "productos.txt", "ID;Nombre;Precio\n\n");

    let result = engine_for(temp_dir.path()).run();

    assert!(matches!(result, Err(ReportError::EmptyCatalog { .. })));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("reporte_ventas.txt"))?,
        "previous run\n"
    );
    Ok(())
}

#[test]
fn test_missing_roster_fails_without_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());
    fs::remove_file(temp_dir.path().join("vendedores.txt"))?;

    let result = engine_for(temp_dir.path()).run();

    assert!(matches!(result, Err(ReportError::MissingSource { .. })));
    assert!(!temp_dir.path().join("reporte_ventas.txt").exists());
    Ok(())
}

#[test]
fn test_toml_config_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write(temp_dir.path(), "in/products.txt", CATALOG);
    write(temp_dir.path(), "in/salespeople.txt", "name;id\nJuan Perez;1\n");
    write(
        temp_dir.path(),
        "in/sales/Juan Perez_sales",
        "Juan Perez;1\n125;Sillas;2\n284;Taladro;1\n",
    );

    let config = TomlConfig::from_toml_str(
        r#"
[sources]
catalog = "in/products.txt"
roster = "in/salespeople.txt"
sales_dir = "in/sales"
sales_suffix = "_sales"

[report]
path = "out/ranking.txt"
header = "Nombre/Apellido;Total ventas"
"#,
    )?;
    assert_eq!(config.report_file(), "out/ranking.txt");

    let storage = LocalStorage::new(temp_dir.path());
    let mut engine = EtlEngine::new(RevenuePipeline::new(storage, config));
    let summary = engine.run()?;

    let content = fs::read_to_string(summary.report_path)?;
    assert_eq!(content, "Nombre/Apellido;Total ventas\n\nJuan Perez;104850\n");
    Ok(())
}

#[test]
fn test_render_matches_file_written() -> Result<()> {
    let temp_dir = TempDir::new()?;
    seed_data_dir(temp_dir.path());

    let mut engine = engine_for(temp_dir.path());
    let summary = engine.run()?;
    let written = fs::read_to_string(summary.report_path)?;

    let ranked = report::rank(vec![
        sales_report::RevenueTotal {
            salesperson: "Pedro Rodriguez".to_string(),
            total: 0,
        },
        sales_report::RevenueTotal {
            salesperson: "Luisa Martinez".to_string(),
            total: 31950,
        },
        sales_report::RevenueTotal {
            salesperson: "Maria Gonzalez".to_string(),
            total: 153450,
        },
        sales_report::RevenueTotal {
            salesperson: "Juan Perez".to_string(),
            total: 31950,
        },
    ]);
    assert_eq!(written, report::render(&ranked, report::DEFAULT_HEADER));
    Ok(())
}
