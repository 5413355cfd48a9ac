//! Static prompt catalog: greetings and suggestion instructions shown by the
//! chat surfaces. Product copy, no logic.

/// Greeting for the coordinator ("post-generator") surface.
pub const COORDINATOR_GREETING: &str = "Olá! Sou um agente de IA jurídico do Vieira Pires Advogados, especializado em direito empresarial, societário, tributário e contratos. Posso ajudar com consultas jurídicas, estruturação societária, planejamento fiscal e elaboração de contratos.\n\nClique nas sugestões para começar.";

/// Greeting for the specialist surface.
pub const SPECIALIST_GREETING: &str = "Olá! Sou um agente especializado em análise de documentos jurídicos e estruturas societárias. Posso analisar contratos, estatutos sociais e outros documentos empresariais.\n\nClique nas sugestões para começar.";

/// Suggestion instructions for the coordinator surface.
pub const COORDINATOR_SUGGESTIONS: &str = "Gere sugestões relacionadas a consultas jurídicas empresariais, como estruturação societária, planejamento tributário, elaboração de contratos e questões de compliance.";

/// Suggestion instructions for the specialist surface.
pub const SPECIALIST_SUGGESTIONS: &str = r#"Gere sugestões relacionadas à análise de documentos jurídicos empresariais, tais como:
[
  "Análise de contrato social",
  "Revisão de acordo de sócios",
  "Avaliação de estrutura de holding",
  "Análise de contrato de prestação de serviços",
  "Revisão de acordo de confidencialidade",
  "Avaliação de cláusulas contratuais",
  "Análise de compliance tributário",
  "Revisão de estrutura societária",
  "Avaliação de due diligence",
  "Análise de contratos de M&A"
]"#;

/// Greeting for a given agent: the coordinator gets the coordinator copy,
/// every specialist gets the specialist copy.
pub fn greeting_for(agent: &crate::agents::AgentId) -> &'static str {
    if *agent == crate::agents::COORDINATOR {
        COORDINATOR_GREETING
    } else {
        SPECIALIST_GREETING
    }
}

/// Suggestion instructions for a given agent.
pub fn suggestions_for(agent: &crate::agents::AgentId) -> &'static str {
    if *agent == crate::agents::COORDINATOR {
        COORDINATOR_SUGGESTIONS
    } else {
        SPECIALIST_SUGGESTIONS
    }
}
