//! Prompt templates. Pure functions from validated inputs to prompt text.
//!
//! Inputs are rendered verbatim; validation is the caller's job.

use crate::domain::{BudgetInput, ExpenseMap, Goal, NluResult, Persona, SpendingInput};

/// Rendered in place of a goal deadline the user did not give.
pub const NO_DEADLINE: &str = "N/A";

/// Question-answering prompt enriched with the NLU pre-analysis.
pub fn build_qa_prompt(question: &str, nlu: &NluResult, persona: Persona) -> String {
    format!(
        "You are a personal finance assistant. The user is a {persona}.\n\
         {tone}\n\
         User's sentiment: {sentiment}\n\
         Keywords: {keywords}\n\
         Entities: {entities}\n\
         User question: {question}\n\
         Please provide a clear, concise, and helpful financial advice answer.",
        persona = persona,
        tone = persona.tone_hint(),
        sentiment = nlu.sentiment,
        keywords = nlu.keywords.join(", "),
        entities = nlu.entities.join(", "),
        question = question,
    )
}

/// Monthly budget summary prompt.
pub fn build_budget_prompt(input: &BudgetInput) -> String {
    let cur = &input.currency;
    format!(
        "You are a personal finance assistant helping a {persona}.\n\
         {tone}\n\
         Income: {cur}{income}\n\
         Expenses:\n{expenses}\n\
         Total expenses: {cur}{total}\n\
         Savings goal: {cur}{savings}\n\
         Please provide a summary of the budget, highlight top spending categories, \
         and give actionable advice to improve savings.",
        persona = input.persona,
        tone = input.persona.tone_hint(),
        cur = cur,
        income = input.income,
        expenses = expense_lines(&input.expenses, cur),
        total = total_expenses(&input.expenses),
        savings = input.savings_goal,
    )
}

/// Spending-vs-goals feasibility prompt.
pub fn build_spending_prompt(input: &SpendingInput) -> String {
    let cur = &input.currency;
    format!(
        "You are a personal finance assistant helping a {persona}.\n\
         {tone}\n\
         Income: {cur}{income}\n\
         Expenses:\n{expenses}\n\
         Total expenses: {cur}{total}\n\
         Goals:\n{goals}\n\
         Analyze the spending patterns and provide insights on how to achieve the goals, \
         including whether current spending allows meeting the goals.",
        persona = input.persona,
        tone = input.persona.tone_hint(),
        cur = cur,
        income = input.income,
        expenses = expense_lines(&input.expenses, cur),
        total = total_expenses(&input.expenses),
        goals = goal_lines(&input.goals, cur),
    )
}

/// `- category: <cur><amount>` per entry, in insertion order. Empty map -> empty string.
fn expense_lines(expenses: &ExpenseMap, cur: &str) -> String {
    expenses
        .iter()
        .map(|(category, amount)| format!("- {}: {}{}", category, cur, amount))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- name: <cur><amount> by <deadline>` per goal. Empty slice -> empty string.
fn goal_lines(goals: &[Goal], cur: &str) -> String {
    goals
        .iter()
        .map(|g| {
            format!(
                "- {}: {}{} by {}",
                g.name,
                cur,
                g.target_amount,
                g.deadline.as_deref().unwrap_or(NO_DEADLINE)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sum of all expenses, rounded to cents.
fn total_expenses(expenses: &ExpenseMap) -> f64 {
    let sum: f64 = expenses.values().sum();
    (sum * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;

    fn expenses(entries: &[(&str, f64)]) -> ExpenseMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn expense_line_count(prompt: &str) -> usize {
        // goal lines contain " by ", expense lines never do
        prompt
            .lines()
            .filter(|l| l.starts_with("- ") && !l.contains(" by "))
            .count()
    }

    #[test]
    fn test_budget_prompt_contains_inputs() {
        let input = BudgetInput {
            income: 3000.0,
            savings_goal: 500.0,
            expenses: expenses(&[("Rent", 1000.0), ("Food", 300.0)]),
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        let prompt = build_budget_prompt(&input);

        assert!(prompt.contains("helping a student"));
        assert!(prompt.contains("Income: $3000\n"));
        assert!(prompt.contains("- Rent: $1000\n- Food: $300\n"));
        assert!(prompt.contains("Total expenses: $1300\n"));
        assert!(prompt.contains("Savings goal: $500\n"));
    }

    #[test]
    fn test_total_expenses_has_no_float_noise() {
        let input = BudgetInput {
            income: 3000.0,
            savings_goal: 500.0,
            expenses: expenses(&[("Rent", 10.1), ("Food", 20.2)]),
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        let prompt = build_budget_prompt(&input);
        assert!(prompt.contains("Total expenses: $30.3\n"), "{prompt}");

        let spending = SpendingInput {
            income: 3000.0,
            expenses: expenses(&[("Coffee", 0.1), ("Snacks", 0.2), ("Bus", 1199.99)]),
            goals: Vec::new(),
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        assert!(build_spending_prompt(&spending).contains("Total expenses: $1200.29\n"));
    }

    #[test]
    fn test_expense_lines_one_per_entry_in_order() {
        for n in [0usize, 1, 4, 9] {
            let entries: Vec<(String, f64)> = (0..n)
                .map(|i| (format!("Category{}", n - i), i as f64 * 10.5))
                .collect();
            let map: ExpenseMap = entries.iter().cloned().collect();
            let input = BudgetInput {
                income: 100.0,
                savings_goal: 0.0,
                expenses: map.clone(),
                currency: "€".to_string(),
                persona: Persona::Professional,
            };
            let prompt = build_budget_prompt(&input);
            assert_eq!(expense_line_count(&prompt), n);

            let positions: Vec<usize> = entries
                .iter()
                .map(|(k, _)| prompt.find(&format!("- {}:", k)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let spending = SpendingInput {
                income: 100.0,
                expenses: map,
                goals: Vec::new(),
                currency: "€".to_string(),
                persona: Persona::Professional,
            };
            assert_eq!(expense_line_count(&build_spending_prompt(&spending)), n);
        }
    }

    #[test]
    fn test_empty_collections_yield_empty_blocks() {
        let input = SpendingInput {
            income: 1200.0,
            expenses: ExpenseMap::new(),
            goals: Vec::new(),
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        let prompt = build_spending_prompt(&input);
        assert!(prompt.contains("Expenses:\n\nTotal expenses: $0\n"));
        assert!(prompt.contains("Goals:\n\nAnalyze"));
    }

    #[test]
    fn test_goal_lines_with_and_without_deadline() {
        let input = SpendingInput {
            income: 3000.0,
            expenses: expenses(&[("Rent", 1000.0)]),
            goals: vec![
                Goal {
                    name: "Emergency Fund".to_string(),
                    target_amount: 1000.0,
                    deadline: Some("6 months".to_string()),
                },
                Goal {
                    name: "Laptop".to_string(),
                    target_amount: 799.99,
                    deadline: None,
                },
            ],
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        let prompt = build_spending_prompt(&input);
        let goal_lines: Vec<&str> = prompt.lines().filter(|l| l.contains(" by ")).collect();
        assert_eq!(
            goal_lines,
            vec![
                "- Emergency Fund: $1000 by 6 months",
                "- Laptop: $799.99 by N/A"
            ]
        );
    }

    #[test]
    fn test_qa_prompt_embeds_nlu() {
        let nlu = NluResult::from_entities(
            Sentiment::Negative,
            vec!["Visa".to_string(), "Chase".to_string()],
        );
        let prompt = build_qa_prompt("How do I pay off my Visa card?", &nlu, Persona::Professional);

        assert!(prompt.contains("The user is a professional."));
        assert!(prompt.contains("User's sentiment: negative\n"));
        assert!(prompt.contains("Keywords: Visa, Chase\n"));
        assert!(prompt.contains("Entities: Visa, Chase\n"));
        assert!(prompt.contains("User question: How do I pay off my Visa card?\n"));
    }

    #[test]
    fn test_qa_prompt_with_neutral_fallback() {
        let prompt = build_qa_prompt("hi", &NluResult::NEUTRAL, Persona::Student);
        assert!(prompt.contains("User's sentiment: neutral\nKeywords: \nEntities: \n"));
    }
}
