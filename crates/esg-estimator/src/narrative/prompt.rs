use std::fmt::Write as _;

use crate::scoring::OnboardingData;

/// Consultant prompt asking for a short executive summary of the inputs.
pub fn build_audit_prompt(data: &OnboardingData) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Act as a Senior ESG Consultant specialized in 2026 sustainability standards."
    );
    let _ = writeln!(
        prompt,
        "Analyze the following company data and provide a concise, professional executive summary (max 300 words)."
    );
    let _ = writeln!(
        prompt,
        "Include specific, actionable insights on energy efficiency, waste management, and supply chain sourcing."
    );
    prompt.push('\n');
    let _ = writeln!(prompt, "Company Data:");
    let _ = writeln!(prompt, "- Company: {}", data.company_name);
    let _ = writeln!(prompt, "- Industry: {}", data.industry);
    let _ = writeln!(prompt, "- Location: {}", data.location);
    let _ = writeln!(prompt, "- Monthly Energy: {} kWh", data.monthly_kwh);
    let _ = writeln!(prompt, "- Monthly Waste: {} kg", data.waste_volume);
    let _ = writeln!(prompt, "- Fleet: {}", data.fleet_type);
    let _ = writeln!(
        prompt,
        "- Sustainable Materials: {}%",
        data.sustainable_materials
    );
    let _ = writeln!(prompt, "- Revenue: ${}", data.annual_revenue);
    prompt.push('\n');
    let _ = write!(
        prompt,
        "Format with professional Markdown headings. Use a tone that is expert, encouraging, and serious."
    );

    prompt
}
