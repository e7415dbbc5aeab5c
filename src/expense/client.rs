//! An async HTTP client for the external Expense API.

use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::{
    Error,
    expense::core::{ExpenseId, ExpenseList, FilterState, MutationOutcome, NewExpense},
    statistics::StatisticsSummary,
};

const EXPENSES_PATH: &str = "api/expenses";
const STATISTICS_PATH: &str = "api/statistics";
const CATEGORIES_PATH: &str = "api/categories";

/// Talks to the Expense API that stores the expenses.
///
/// Cloning the client is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ExpenseApiClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct CategoryList {
    categories: Vec<String>,
}

impl ExpenseApiClient {
    /// Create a client for the Expense API served at `base_url`, e.g.
    /// "http://127.0.0.1:5000".
    ///
    /// # Errors
    /// Returns [Error::InvalidApiUrl] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut url = Url::parse(base_url).map_err(|error| {
            tracing::error!("Could not parse the expense API URL {base_url:?}: {error}");
            Error::InvalidApiUrl(base_url.to_owned())
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::InvalidApiUrl(base_url.to_owned()));
        }

        // Without the trailing slash, `Url::join` would drop the last path segment.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            http: Client::new(),
            base_url: url,
        })
    }

    /// The URL the API is served from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|_| Error::InvalidApiUrl(self.base_url.to_string()))
    }

    /// Create an expense.
    ///
    /// Returns the success message from the API, if it sent one.
    ///
    /// # Errors
    /// Returns [Error::ApiRejected] with the API's error text if the API
    /// reports a failure, or [Error::ApiUnavailable] if the API cannot be reached.
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<Option<String>, Error> {
        let url = self.url(EXPENSES_PATH)?;
        tracing::debug!("POST {url}: {expense:?}");

        let response = self.http.post(url).json(expense).send().await?;

        read_mutation_outcome(response).await
    }

    /// Get the expenses that match `filter` and their total.
    ///
    /// # Errors
    /// Returns an error if the API cannot be reached, answers with an error
    /// status, or sends a body that is not an expense list.
    pub async fn list_expenses(&self, filter: &FilterState) -> Result<ExpenseList, Error> {
        let mut url = self.url(EXPENSES_PATH)?;
        let query = serde_urlencoded::to_string(filter)
            .map_err(|error| Error::InvalidApiUrl(error.to_string()))?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        tracing::debug!("GET {url}");

        let list = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ExpenseList>()
            .await?;

        Ok(list)
    }

    /// Delete the expense with `id`.
    ///
    /// Returns the success message from the API, if it sent one.
    ///
    /// # Errors
    /// Returns [Error::ApiRejected] with the API's error text if the API
    /// reports a failure, e.g. the expense does not exist, or
    /// [Error::ApiUnavailable] if the API cannot be reached.
    pub async fn delete_expense(&self, id: &ExpenseId) -> Result<Option<String>, Error> {
        let mut url = self.url(EXPENSES_PATH)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidApiUrl(self.base_url.to_string()))?
            .push(id.as_ref());
        tracing::debug!("DELETE {url}");

        let response = self.http.delete(url).send().await?;

        read_mutation_outcome(response).await
    }

    /// Get the aggregate statistics over all expenses.
    ///
    /// # Errors
    /// Returns an error if the API cannot be reached, answers with an error
    /// status, or sends a body that is not a statistics summary.
    pub async fn get_statistics(&self) -> Result<StatisticsSummary, Error> {
        let url = self.url(STATISTICS_PATH)?;
        tracing::debug!("GET {url}");

        let statistics = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<StatisticsSummary>()
            .await?;

        Ok(statistics)
    }

    /// Get the distinct categories of all expenses.
    ///
    /// # Errors
    /// Returns an error if the API cannot be reached, answers with an error
    /// status, or sends a body that is not a category list.
    pub async fn get_categories(&self) -> Result<Vec<String>, Error> {
        let url = self.url(CATEGORIES_PATH)?;
        tracing::debug!("GET {url}");

        let list = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<CategoryList>()
            .await?;

        Ok(list.categories)
    }
}

/// Interpret the answer to a create or delete request.
///
/// The API reports failures both through the status code and the body, so the
/// body is read whatever the status. Anything but `success: true` is a failure.
async fn read_mutation_outcome(response: Response) -> Result<Option<String>, Error> {
    let status = response.status();

    match response.json::<MutationOutcome>().await {
        Ok(outcome) if outcome.success && status.is_success() => Ok(outcome.message),
        Ok(outcome) => Err(Error::ApiRejected {
            status,
            reason: outcome.error,
        }),
        Err(error) if status.is_success() => {
            tracing::error!("Could not decode the expense API response: {error}");
            Err(Error::InvalidApiResponse(error.to_string()))
        }
        Err(error) => {
            tracing::warn!("Expense API answered {status} with an undecodable body: {error}");
            Err(Error::ApiRejected {
                status,
                reason: None,
            })
        }
    }
}
