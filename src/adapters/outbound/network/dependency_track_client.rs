use crate::pipeline::domain::{ProjectCoordinates, ProjectRecord, SbomArtifact};
use crate::ports::outbound::IntelligenceService;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;
use serde_json::Value;

/// Longest response body excerpt quoted in a decode error
const MAX_BODY_EXCERPT: usize = 512;

/// Dependency-Track REST client
///
/// Talks to `POST {base}/bom` and `GET {base}/project`. Redirects are not
/// followed: the service's success band is 2xx only, so a 3xx is a failure
/// like any other non-2xx status.
pub struct DependencyTrackClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl DependencyTrackClient {
    const API_KEY_HEADER: &'static str = "X-Api-Key";

    /// Creates a client for the API rooted at `api_url` (e.g. `http://dtrack:8080/api/v1`)
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sbom-pipeline/{}", version);
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn bom_endpoint(&self) -> String {
        format!("{}/bom", self.api_url)
    }

    fn project_lookup_url(&self, project: &ProjectCoordinates) -> String {
        format!(
            "{}/project?name={}&version={}",
            self.api_url,
            urlencoding::encode(project.name()),
            urlencoding::encode(project.version())
        )
    }

    /// Status line plus the body, verbatim
    fn describe_rejection(response: Response) -> String {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        format!("HTTP {}: {}", status, body)
    }
}

impl IntelligenceService for DependencyTrackClient {
    fn submit_bom(&self, project: &ProjectCoordinates, sbom: &SbomArtifact) -> Result<()> {
        let endpoint = self.bom_endpoint();
        let upload_error = |details: String| PipelineError::Upload {
            endpoint: endpoint.clone(),
            details,
        };

        let bom = Part::bytes(sbom.contents().to_vec()).file_name(sbom.file_name());
        let form = Form::new()
            .text("projectName", project.name().to_string())
            .text("projectVersion", project.version().to_string())
            .text("autoCreate", "true")
            .part("bom", bom);

        let response = self
            .client
            .post(&endpoint)
            .header(Self::API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| upload_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(upload_error(Self::describe_rejection(response)).into());
        }

        Ok(())
    }

    fn find_projects(&self, project: &ProjectCoordinates) -> Result<Vec<ProjectRecord>> {
        let resolution_error = |details: String| PipelineError::Resolution {
            project_name: project.name().to_string(),
            project_version: project.version().to_string(),
            details,
        };

        let response = self
            .client
            .get(self.project_lookup_url(project))
            .header(Self::API_KEY_HEADER, &self.api_key)
            .send()
            .map_err(|e| resolution_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(resolution_error(Self::describe_rejection(response)).into());
        }

        let body = response
            .text()
            .map_err(|e| resolution_error(e.to_string()))?;
        parse_project_records(&body).map_err(|details| resolution_error(details).into())
    }
}

/// Decodes the lookup response: a JSON array of project objects
///
/// Only the outer array is checked. Fields are read from each element
/// individually, so an element of the wrong shape yields an empty record
/// instead of failing the whole lookup.
fn parse_project_records(body: &str) -> std::result::Result<Vec<ProjectRecord>, String> {
    let rows: Vec<Value> = serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        format!("Unexpected project lookup response ({}): {}", e, excerpt)
    })?;
    Ok(rows.iter().map(project_record).collect())
}

fn project_record(row: &Value) -> ProjectRecord {
    let field = |name: &str| row.get(name).and_then(Value::as_str).map(str::to_string);
    ProjectRecord {
        uuid: field("uuid"),
        name: field("name"),
        version: field("version"),
    }
}
