//! Instruction text sent with every analysis request

use crate::url::RepoId;

/// Prompt asking the provider to invent a plausible breakdown from the
/// repository name alone. It must never try to reach the repository.
pub fn build_prompt(repo_url: &str, repo: &RepoId) -> String {
    format!(
        r#"You are an expert software architect. A user has provided the following GitHub repository URL: {url}.
Your task is to simulate cloning and analyzing this repository. DO NOT access the actual URL.
Instead, based on the repository name "{repo}", generate a plausible and representative analysis for a modern full-stack web application.

Create a detailed breakdown for both the frontend and backend, including a summary, key technologies, and a typical file structure.
For example, if the name is 'my-ecommerce-app', generate a structure for a React frontend and a Node.js/Express backend. If it's 'data-viz-dashboard', maybe use Next.js and a Python/Flask backend. Use your best judgment to create a realistic and insightful simulation.
For file tree nodes of type 'file', you must not include a 'children' property.

Your response MUST be a JSON object that strictly adheres to the provided schema."#,
        url = repo_url,
        repo = repo,
    )
}
