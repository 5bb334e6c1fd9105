use clap::ValueEnum;
use comfy_table::{Row, Table};
use serde::Serialize;

#[derive(ValueEnum, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[allow(non_camel_case_types)]
pub enum OutputType {
    #[default]
    table,
    yaml,
    json,
}

/// Anything that lists as rows of a table
pub trait TableOutputHandler {
    fn header(&self) -> Row;
    fn content(&self) -> Vec<Row>;
}

/// Render `list` as a table, or serialize it as YAML or JSON.
pub fn render_list<T>(list: &T, mode: OutputType) -> anyhow::Result<String>
where
    T: TableOutputHandler + Serialize,
{
    let out = match mode {
        OutputType::table => {
            let mut table = Table::new();
            table.set_header(list.header());
            for row in list.content() {
                table.add_row(row);
            }
            table.load_preset(comfy_table::presets::NOTHING);
            table.to_string()
        }
        OutputType::yaml => serde_yaml::to_string(list)?,
        OutputType::json => serde_json::to_string_pretty(list)?,
    };
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Names(Vec<&'static str>);

    impl TableOutputHandler for Names {
        fn header(&self) -> Row {
            Row::from(["NAME"])
        }

        fn content(&self) -> Vec<Row> {
            self.0.iter().map(|name| Row::from([*name])).collect()
        }
    }

    #[test]
    fn test_render_modes() {
        let names = Names(vec!["vm", "vmi"]);

        let table = render_list(&names, OutputType::table).unwrap();
        assert!(table.contains("NAME"));
        assert!(table.contains("vmi"));

        assert_eq!(render_list(&names, OutputType::yaml).unwrap(), "- vm\n- vmi\n");
        let json: serde_json::Value =
            serde_json::from_str(&render_list(&names, OutputType::json).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(["vm", "vmi"]));
    }
}
