//! Excel workbook API under `.../items/{id}/workbook`.

mod charts;
mod functions;
mod ranges;
mod tables;
mod worksheets;

pub use charts::{
    ChartFillRequestBuilder, ChartFontRequestBuilder, ChartFormatRequestBuilder,
    ChartItemRequestBuilder, ChartsRequestBuilder, ClearRequestBuilder,
    SetSolidColorRequestBuilder,
};
pub use functions::{AbsRequestBuilder, FunctionsRequestBuilder, SumRequestBuilder};
pub use ranges::RangeRequestBuilder;
pub use tables::{
    ColumnAtRequestBuilder, ColumnItemRequestBuilder, ColumnsRequestBuilder, RowAtRequestBuilder,
    RowItemRequestBuilder, RowsRequestBuilder, TableItemRequestBuilder, TablesRequestBuilder,
};
pub use worksheets::{WorksheetItemRequestBuilder, WorksheetsRequestBuilder};

use msgraph_abstractions::{GraphResult, HttpMethod, RequestInformation};

use crate::models::{odata_error_mappings, Workbook};
use crate::query::{ItemRequestConfiguration, ITEM_QUERY};

request_builder!(WorkbookRequestBuilder, ITEM_QUERY);

impl WorkbookRequestBuilder {
    pub fn worksheets(&self) -> WorksheetsRequestBuilder {
        self.child("/worksheets", WorksheetsRequestBuilder::new)
    }

    /// Tables across all worksheets.
    pub fn tables(&self) -> TablesRequestBuilder {
        self.child("/tables", TablesRequestBuilder::new)
    }

    pub fn functions(&self) -> FunctionsRequestBuilder {
        self.child("/functions", FunctionsRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<Workbook>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&ItemRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }
}
