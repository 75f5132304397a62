//! Sample document served whenever the recommendation backend cannot answer.
//! The content is static and never depends on the submitted profile.

pub const FALLBACK_TEMPLATE: &str = r#"
⚠️ **Backend API Unavailable - Showing Sample Data**

Please ensure:
1. Recommendation backend is running: `python backend_api.py`
2. Ollama is running: `ollama serve`

---

🎯 **Sample Recommendations**

Based on typical needs for your profile, here are common recommendations:

🥇 **Star Comprehensive Insurance Policy**
- Comprehensive coverage with maternity benefits
- 50% NCB per claim-free year
- Premium: ₹15,000-18,000/year

🥈 **HDFC ERGO Optima Secure**
- Excellent CSR of 98.85%
- Higher sum insured options
- Premium: ₹18,000-22,000/year

🥉 **Star Health Assure**
- Budget-friendly option
- Lifelong renewability
- Premium: ₹12,000-15,000/year

---

💡 **To get real AI recommendations:**
```bash
# Terminal 1: start the recommendation backend
python backend_api.py

# Terminal 2: start the model server it depends on
ollama serve
```
"#;

/// Medals in ranking order, as they prefix each sample plan.
#[cfg(test)]
pub const RANK_MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn fallback_content() -> String {
    FALLBACK_TEMPLATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_warning_banner() {
        assert!(FALLBACK_TEMPLATE.contains("⚠️ **Backend API Unavailable - Showing Sample Data**"));
    }

    #[test]
    fn test_template_has_two_numbered_steps() {
        let steps: Vec<&str> = FALLBACK_TEMPLATE
            .lines()
            .filter(|l| l.starts_with("1. ") || l.starts_with("2. ") || l.starts_with("3. "))
            .collect();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].contains("backend"));
        assert!(steps[1].contains("ollama serve"));
    }

    #[test]
    fn test_template_ranks_exactly_three_plans() {
        for medal in RANK_MEDALS {
            assert_eq!(FALLBACK_TEMPLATE.matches(medal).count(), 1, "{medal}");
        }
        assert_eq!(FALLBACK_TEMPLATE.matches("Premium: ₹").count(), 3);
    }
}
