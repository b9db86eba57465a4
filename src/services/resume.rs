// src/services/resume.rs
//
// The static resume graph: skills, employers and projects as nodes, with
// links the frontend renders as a force-directed graph. Loaded once from the
// embedded dataset and never mutated.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub color: String,
    pub val: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResumeGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl ResumeGraph {
    pub fn load() -> serde_json::Result<Self> {
        serde_json::from_str(include_str!("../../data/resume_graph.json"))
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes ordered by name length, longest first, so that a specific name
    /// like "Conversational AI" is preferred over a shorter substring like
    /// "AI" during keyword matching.
    pub fn nodes_longest_first(&self) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        nodes
    }

    pub fn neighbors(&self, id: &str) -> Vec<&GraphNode> {
        self.links
            .iter()
            .filter_map(|link| {
                if link.source == id {
                    self.node(&link.target)
                } else if link.target == id {
                    self.node(&link.source)
                } else {
                    None
                }
            })
            .collect()
    }

    /// The flattened resume context both remote providers are prompted with.
    /// The list of valid node ids is generated from the dataset so the prompt
    /// can never drift out of sync with the graph.
    pub fn system_context(&self) -> String {
        let ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut context = String::from(RESUME_CONTEXT);
        let _ = write!(
            context,
            "\n   - Available IDs: {:?}\n   - \"action\": One of {:?} when the user asks for a link, contact or the resume document; otherwise null.\n",
            ids,
            ["open_linkedin", "open_github", "open_portfolio", "call_phone", "email_me", "download_resume"],
        );
        context
    }
}

const RESUME_CONTEXT: &str = r#"You are the AI Digital Twin of Kumar Gyanam. You are an expert in Agentic AI, RAG, and Automation.
Your goal is to impress the user (a potential recruiter or tech lead) with your knowledge of Kumar's career.

--- KUMAR'S RESUME ---
Contact Info:
- Phone: +91 9953682525
- Email: gyanamc@gmail.com
- LinkedIn: https://www.linkedin.com/in/kumar-gyanam/
- Portfolio: https://gyanam.store/
- Total Experience: 20 Years (2006 - Present)

Title: Chief AI Architect | AI Strategy Leader | Deputy Vice President - Conversational AI at SBI Card (April 2023 - Present)
- Sovereign On-Premise Agentic RAG Platform: Architected air-gapped RAG ecosystem for 100% data sovereignty.
- Orchestration: Leveraged LangGraph (Stateful Agents) & LangChain for multi-turn reasoning.
- Tech Stack: Ray Serve (Distributed Serving), vLLM, ELK Stack (Vector Search), Llama-3, Mistral.
- MLOps: Ragas (RAG Evaluation), MLflow, Airflow, Prometheus.
- Impact: Scaled platform to 22M+ users & 21M+ transactions/month (99.9% uptime).
- Strategic: Authored board-approved AI roadmap; drove 400% growth in AI bill payments.

Previous Role: Analytics Delivery Head at Brane Group (Jan 22 - Apr 23)
- Healthcare AI (Ambulance optimization), Financial Risk (Fraud Detection), Ad-Tech.

Previous Role: Head of Tech Architecture at Pixstory (Jan 19 - Jan 22)
- Built recommendation engine (180% engagement boost).
- Scaled to 100K+ users.

Previous Role: Chief Manager - BI at The Indian Express (July 09 - Jan 19)
- Transformed subscription architecture. Reduced detractors by 50% via text mining.

Previous Roles:
- Axis Bank (Sales Manager, 2008-09): Managed 200 Cr+ disbursement.
- ICICI Bank (Sales Manager, 2006-08): Franchise network, 60 Cr+ portfolio.

Education & Leadership:
- Faculty at IIM-Indore and ISB (AI Strategy).
- IIM Calcutta (AI-Powered Marketing), IRM (MBA), Ranchi University (B.Sc Math/Stats).

Skills:
- Agentic AI: LangGraph, LangChain, n8n, Agentic RAG.
- GenAI Stack: Ray Serve, vLLM, ELK, Llama-3, Mistral.
- Cloud: Railway.app (Expert - 30+ deployments), AWS, Firebase, K8s, Docker.
- Languages: Python, SQL/NoSQL.

Projects:
- Credit Card RecSys: Real-time discovery engine.
- Agent-Assist: AI reply generation for live agents (reduced AHT).
- Internal GPT: Secure document portal for employees.
- Self-Healing AI: Human-in-the-Loop (HITL) framework.
---------------------

INSTRUCTIONS:
1. Answer the user's question about Kumar based ONLY on the context above.
2. Be concise but impressive. Use a professional yet innovative tone.
3. If the user asks about a specific skill or project that exists in the resume, mention it clearly.
4. Return a JSON object with:
   - "text": The answer string.
   - "nodeId": The ID of the node in the graph to highlight (e.g., "sbi", "python", "n8n", "ask_ila"). If no specific node fits, return null."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses() {
        let graph = ResumeGraph::load().unwrap();
        assert!(!graph.nodes.is_empty());
        assert!(!graph.links.is_empty());
    }

    #[test]
    fn links_reference_known_nodes() {
        let graph = ResumeGraph::load().unwrap();
        for link in &graph.links {
            assert!(graph.node(&link.source).is_some(), "bad source {}", link.source);
            assert!(graph.node(&link.target).is_some(), "bad target {}", link.target);
        }
    }

    #[test]
    fn longest_first_ordering() {
        let graph = ResumeGraph::load().unwrap();
        let ordered = graph.nodes_longest_first();
        for pair in ordered.windows(2) {
            assert!(pair[0].name.len() >= pair[1].name.len());
        }
        // The specific case the ordering exists for.
        let conversational = ordered.iter().position(|n| n.id == "conversational_ai");
        let agentic = ordered.iter().position(|n| n.id == "agentic_ai");
        assert!(conversational.unwrap() < agentic.unwrap());
    }

    #[test]
    fn system_context_lists_every_node_id() {
        let graph = ResumeGraph::load().unwrap();
        let context = graph.system_context();
        for node in &graph.nodes {
            assert!(context.contains(&node.id), "missing id {}", node.id);
        }
    }
}
