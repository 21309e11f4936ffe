use tracing::debug;

pub const PROMPT_PREAMBLE: &str =
    "Explain what's wrong with a Kubernetes pod that contains following events:";

const DIVIDER: &str = "-------------------------------";

/// Build the question sent to the chat model: the preamble, then one event per line.
pub fn build_prompt(pod_name: &str, events: &[String]) -> String {
    let mut prompt = String::from(PROMPT_PREAMBLE);
    for event in events {
        prompt.push('\n');
        prompt.push_str(event);
    }
    debug!("Built prompt for pod {} from {} events", pod_name, events.len());
    prompt
}

/// Strip double quotes from a model answer.
pub fn sanitize_answer(answer: &str) -> String {
    answer.replace('"', "")
}

pub fn format_answer(pod_name: &str, answer: &str) -> String {
    format!(
        "\nHere's the solution for the issues with pod {}:\n\n\n{}\n\n{}\n\n",
        pod_name, answer, DIVIDER
    )
}
