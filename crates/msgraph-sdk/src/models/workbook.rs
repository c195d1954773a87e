//! Excel workbook models and function request bodies.
//!
//! Cell payloads (`values`, `formulas`, `numberFormat`, ...) are arbitrary
//! JSON: usually a 2D array whose elements may be strings, numbers,
//! booleans or nulls. They are exposed as [`serde_json::Value`].

use serde_json::Value;

graph_model! {
    pub struct Workbook = "#microsoft.graph.workbook" {
        value "id" => id / set_id: String;
        collection "tables" => tables / set_tables: WorkbookTable;
        collection "worksheets" => worksheets / set_worksheets: WorkbookWorksheet;
    }
}

graph_model! {
    pub struct WorkbookWorksheet = "#microsoft.graph.workbookWorksheet" {
        value "id" => id / set_id: String;
        value "name" => name / set_name: String;
        value "position" => position / set_position: i32;
        value "visibility" => visibility / set_visibility: String;
        collection "charts" => charts / set_charts: WorkbookChart;
        collection "tables" => tables / set_tables: WorkbookTable;
    }
}

graph_model! {
    /// A rectangular block of cells.
    pub struct WorkbookRange = "#microsoft.graph.workbookRange" {
        value "id" => id / set_id: String;
        value "address" => address / set_address: String;
        value "addressLocal" => address_local / set_address_local: String;
        value "cellCount" => cell_count / set_cell_count: i32;
        value "columnCount" => column_count / set_column_count: i32;
        value "columnHidden" => column_hidden / set_column_hidden: bool;
        value "columnIndex" => column_index / set_column_index: i32;
        value "formulas" => formulas / set_formulas: Value;
        value "formulasLocal" => formulas_local / set_formulas_local: Value;
        value "formulasR1C1" => formulas_r1c1 / set_formulas_r1c1: Value;
        value "hidden" => hidden / set_hidden: bool;
        value "numberFormat" => number_format / set_number_format: Value;
        value "rowCount" => row_count / set_row_count: i32;
        value "rowHidden" => row_hidden / set_row_hidden: bool;
        value "rowIndex" => row_index / set_row_index: i32;
        value "text" => text / set_text: Value;
        value "valueTypes" => value_types / set_value_types: Value;
        value "values" => values / set_values: Value;
        object "worksheet" => worksheet / set_worksheet: WorkbookWorksheet;
    }
}

graph_model! {
    pub struct WorkbookTable = "#microsoft.graph.workbookTable" {
        value "id" => id / set_id: String;
        value "highlightFirstColumn" => highlight_first_column / set_highlight_first_column: bool;
        value "highlightLastColumn" => highlight_last_column / set_highlight_last_column: bool;
        value "legacyId" => legacy_id / set_legacy_id: String;
        value "name" => name / set_name: String;
        value "showBandedColumns" => show_banded_columns / set_show_banded_columns: bool;
        value "showBandedRows" => show_banded_rows / set_show_banded_rows: bool;
        value "showFilterButton" => show_filter_button / set_show_filter_button: bool;
        value "showHeaders" => show_headers / set_show_headers: bool;
        value "showTotals" => show_totals / set_show_totals: bool;
        value "style" => style / set_style: String;
        collection "columns" => columns / set_columns: WorkbookTableColumn;
        collection "rows" => rows / set_rows: WorkbookTableRow;
        object "worksheet" => worksheet / set_worksheet: WorkbookWorksheet;
    }
}

graph_model! {
    pub struct WorkbookTableRow = "#microsoft.graph.workbookTableRow" {
        value "id" => id / set_id: String;
        value "index" => index / set_index: i32;
        value "values" => values / set_values: Value;
    }
}

graph_model! {
    pub struct WorkbookTableColumn = "#microsoft.graph.workbookTableColumn" {
        value "id" => id / set_id: String;
        value "index" => index / set_index: i32;
        value "name" => name / set_name: String;
        value "values" => values / set_values: Value;
    }
}

graph_model! {
    pub struct WorkbookChart = "#microsoft.graph.workbookChart" {
        value "id" => id / set_id: String;
        value "height" => height / set_height: f64;
        value "left" => left / set_left: f64;
        value "name" => name / set_name: String;
        value "top" => top / set_top: f64;
        value "width" => width / set_width: f64;
        object "format" => format / set_format: WorkbookChartAreaFormat;
        object "worksheet" => worksheet / set_worksheet: WorkbookWorksheet;
    }
}

graph_model! {
    pub struct WorkbookChartAreaFormat = "#microsoft.graph.workbookChartAreaFormat" {
        value "id" => id / set_id: String;
        object "fill" => fill / set_fill: WorkbookChartFill;
        object "font" => font / set_font: WorkbookChartFont;
    }
}

graph_model! {
    pub struct WorkbookChartFill = "#microsoft.graph.workbookChartFill" {
        value "id" => id / set_id: String;
    }
}

graph_model! {
    pub struct WorkbookChartFont = "#microsoft.graph.workbookChartFont" {
        value "id" => id / set_id: String;
        value "bold" => bold / set_bold: bool;
        value "color" => color / set_color: String;
        value "italic" => italic / set_italic: bool;
        value "name" => name / set_name: String;
        value "size" => size / set_size: f64;
        value "underline" => underline / set_underline: String;
    }
}

graph_model! {
    /// Result of a workbook function call; `error` is set instead of
    /// `value` when Excel reports a formula error such as `#VALUE!`.
    pub struct WorkbookFunctionResult = "#microsoft.graph.workbookFunctionResult" {
        value "id" => id / set_id: String;
        value "error" => error / set_error: String;
        value "value" => value / set_value: Value;
    }
}

graph_model! {
    pub struct AbsPostRequestBody {
        value "number" => number / set_number: Value;
    }
}

graph_model! {
    pub struct SumPostRequestBody {
        value "values" => values / set_values: Value;
    }
}

graph_model! {
    pub struct SetSolidColorPostRequestBody {
        value "color" => color / set_color: String;
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
