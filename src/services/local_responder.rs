// src/services/local_responder.rs
//
// Keyword fallback that answers from the static resume graph alone. Total
// function, no failure mode, no external calls.

use super::resume::ResumeGraph;
use crate::message::{Action, Reply};

pub fn respond(graph: &ResumeGraph, input: &str) -> Reply {
    let lower = input.to_lowercase();

    // Longest node names first, so "Conversational AI" beats "AI".
    for node in graph.nodes_longest_first() {
        if lower.contains(&node.name.to_lowercase()) {
            return Reply {
                text: format!("Analyzing node [{}]...\n\n{}", node.name, node.desc),
                node_id: Some(node.id.clone()),
                action: None,
            };
        }
    }

    // Keyword buckets, first match wins.
    if lower.contains("experience") || lower.contains("work") {
        return Reply {
            text: "I have extensive experience at SBI Card, Brane Group, Pixstory, and The \
                   Indian Express. Which role interests you?"
                .to_string(),
            node_id: Some("experience".to_string()),
            action: None,
        };
    }
    if lower.contains("skill") || lower.contains("tech") {
        return Reply {
            text: "My stack includes Conversational AI, RAG, n8n, Python, and more. Asking \
                   about a specific one will highlight it."
                .to_string(),
            node_id: Some("skills".to_string()),
            action: None,
        };
    }
    if lower.contains("project") {
        return Reply {
            text: "I've built systems like Ask ILA (21M+ txns) and Agent-Assist. Ask about \
                   'Ask ILA' to see details."
                .to_string(),
            node_id: Some("projects".to_string()),
            action: None,
        };
    }

    // Contact requests resolve to side-effect actions.
    if lower.contains("linkedin") {
        return contact_reply("You can find Kumar on LinkedIn:", Action::OpenLinkedin);
    }
    if lower.contains("github") {
        return contact_reply("Kumar's code lives on GitHub:", Action::OpenGithub);
    }
    if lower.contains("email") || lower.contains("mail") {
        return contact_reply("You can reach Kumar by email:", Action::EmailMe);
    }
    if lower.contains("phone") || lower.contains("call") {
        return contact_reply("You can reach Kumar by phone:", Action::CallPhone);
    }
    if lower.contains("resume") || lower.contains("cv") || lower.contains("download") {
        return contact_reply("Here is the full resume document:", Action::DownloadResume);
    }

    Reply {
        text: "I am accessing my knowledge graph. Try asking about 'Python', 'Experience', \
               or specific projects like 'Ask ILA'."
            .to_string(),
        node_id: None,
        action: None,
    }
}

fn contact_reply(lead_in: &str, action: Action) -> Reply {
    Reply {
        text: format!("{lead_in} {}", action.target()),
        node_id: None,
        action: Some(action),
    }
}
