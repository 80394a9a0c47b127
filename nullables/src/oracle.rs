//! Nullable oracle: questions are resolved by the test, not by a market.

use alloy_primitives::{Address, U256};
use gate_crypto::{question_id, question_id_with_min_bond, QuestionParams};
use gate_oracle::{Oracle, OracleError, QuestionRequest};
use gate_types::{Answer, QuestionId, Timestamp};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// First id handed out by [`NullOracle::create_template`].
const FIRST_TEMPLATE_ID: u64 = 5;

/// One recorded ask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AskedQuestion {
    pub request: QuestionRequest,
    /// `Some` for `ask_question_with_min_bond`.
    pub min_bond: Option<U256>,
    pub question_id: QuestionId,
}

#[derive(Clone, Debug, Default)]
struct QuestionRecord {
    answer: Option<Answer>,
    finalized_at: Option<Timestamp>,
    bond: U256,
}

/// An oracle that derives question ids the way a real one does and reports
/// whatever answers the test sets.
pub struct NullOracle {
    address: Address,
    asker: Address,
    questions: RefCell<HashMap<QuestionId, QuestionRecord>>,
    asked_ids: RefCell<HashSet<QuestionId>>,
    asked: RefCell<Vec<AskedQuestion>>,
    templates: RefCell<Vec<String>>,
    forced_question_id: Cell<Option<QuestionId>>,
    unavailable: Cell<bool>,
    result_queries: Cell<usize>,
}

impl NullOracle {
    /// `address` is the oracle's own address; `asker` is the account every
    /// question is asked from (the module).
    pub fn new(address: Address, asker: Address) -> Self {
        Self {
            address,
            asker,
            questions: RefCell::new(HashMap::new()),
            asked_ids: RefCell::new(HashSet::new()),
            asked: RefCell::new(Vec::new()),
            templates: RefCell::new(Vec::new()),
            forced_question_id: Cell::new(None),
            unavailable: Cell::new(false),
            result_queries: Cell::new(0),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Finalize `question_id` with `answer` at `finalized_at`. Works for
    /// questions that were never asked, too.
    pub fn resolve(&self, question_id: QuestionId, answer: Answer, finalized_at: Timestamp) {
        let mut questions = self.questions.borrow_mut();
        let record = questions.entry(question_id).or_default();
        record.answer = Some(answer);
        record.finalized_at = Some(finalized_at);
    }

    /// Bond posted with the final answer.
    pub fn set_bond(&self, question_id: QuestionId, bond: U256) {
        self.questions
            .borrow_mut()
            .entry(question_id)
            .or_default()
            .bond = bond;
    }

    /// Return `id` from every subsequent ask instead of the derived id.
    pub fn force_question_id(&self, id: Option<QuestionId>) {
        self.forced_question_id.set(id);
    }

    /// Make every subsequent call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn asked(&self) -> Vec<AskedQuestion> {
        self.asked.borrow().clone()
    }

    pub fn ask_count(&self) -> usize {
        self.asked.borrow().len()
    }

    pub fn templates(&self) -> Vec<String> {
        self.templates.borrow().clone()
    }

    /// Number of `result_for` calls so far.
    pub fn result_queries(&self) -> usize {
        self.result_queries.get()
    }

    fn ensure_available(&self) -> Result<(), OracleError> {
        if self.unavailable.get() {
            return Err(OracleError::Unavailable("null oracle offline".into()));
        }
        Ok(())
    }

    fn record_ask(
        &self,
        request: &QuestionRequest,
        min_bond: Option<U256>,
        derived: QuestionId,
    ) -> Result<QuestionId, OracleError> {
        let question_id = self.forced_question_id.get().unwrap_or(derived);
        if !self.asked_ids.borrow_mut().insert(question_id) {
            return Err(OracleError::Rejected("question must not exist".into()));
        }
        self.questions.borrow_mut().entry(question_id).or_default();
        self.asked.borrow_mut().push(AskedQuestion {
            request: request.clone(),
            min_bond,
            question_id,
        });
        Ok(question_id)
    }

    fn record(&self, question_id: &QuestionId) -> Result<QuestionRecord, OracleError> {
        self.questions
            .borrow()
            .get(question_id)
            .cloned()
            .ok_or(OracleError::UnknownQuestion(*question_id))
    }
}

fn params(request: &QuestionRequest) -> QuestionParams {
    QuestionParams {
        template: request.template,
        arbitrator: request.arbitrator,
        timeout: request.timeout,
        opening_ts: request.opening_ts,
        nonce: request.nonce,
    }
}

impl Oracle for NullOracle {
    fn ask_question(&self, request: &QuestionRequest) -> Result<QuestionId, OracleError> {
        self.ensure_available()?;
        let derived = question_id(&params(request), &request.question, self.asker);
        self.record_ask(request, None, derived)
    }

    fn ask_question_with_min_bond(
        &self,
        request: &QuestionRequest,
        min_bond: U256,
    ) -> Result<QuestionId, OracleError> {
        self.ensure_available()?;
        let derived = question_id_with_min_bond(
            &params(request),
            &request.question,
            min_bond,
            self.address,
            self.asker,
        );
        self.record_ask(request, Some(min_bond), derived)
    }

    fn result_for(&self, question_id: &QuestionId) -> Result<Answer, OracleError> {
        self.ensure_available()?;
        self.result_queries.set(self.result_queries.get() + 1);
        self.record(question_id)?
            .answer
            .ok_or(OracleError::NotFinalized(*question_id))
    }

    fn get_bond(&self, question_id: &QuestionId) -> Result<U256, OracleError> {
        self.ensure_available()?;
        Ok(self.record(question_id)?.bond)
    }

    fn get_finalize_ts(&self, question_id: &QuestionId) -> Result<Timestamp, OracleError> {
        self.ensure_available()?;
        self.record(question_id)?
            .finalized_at
            .ok_or(OracleError::NotFinalized(*question_id))
    }

    fn create_template(&self, template: &str) -> Result<U256, OracleError> {
        self.ensure_available()?;
        let mut templates = self.templates.borrow_mut();
        templates.push(template.to_string());
        Ok(U256::from(FIRST_TEMPLATE_ID + templates.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(nonce: u64) -> QuestionRequest {
        QuestionRequest {
            template: U256::from(1337),
            question: "q".into(),
            arbitrator: Address::repeat_byte(3),
            timeout: 42,
            opening_ts: 0,
            nonce: U256::from(nonce),
        }
    }

    #[test]
    fn derives_ids_like_a_real_oracle() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        let id = oracle.ask_question(&request(0)).unwrap();
        let expected = question_id(&params(&request(0)), "q", Address::repeat_byte(5));
        assert_eq!(id, expected);
        assert_eq!(oracle.ask_count(), 1);
        assert_eq!(oracle.asked()[0].min_bond, None);
    }

    #[test]
    fn duplicate_question_is_rejected() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        oracle.ask_question(&request(0)).unwrap();
        assert!(matches!(
            oracle.ask_question(&request(0)),
            Err(OracleError::Rejected(_))
        ));
        assert!(oracle.ask_question(&request(1)).is_ok());
    }

    #[test]
    fn unresolved_questions_have_no_answer() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        let id = oracle.ask_question(&request(0)).unwrap();
        assert!(matches!(oracle.result_for(&id), Err(OracleError::NotFinalized(_))));
        assert!(matches!(
            oracle.result_for(&QuestionId::new([9; 32])),
            Err(OracleError::UnknownQuestion(_))
        ));

        oracle.resolve(id, Answer::ACCEPTED, Timestamp::new(50));
        assert_eq!(oracle.result_for(&id).unwrap(), Answer::ACCEPTED);
        assert_eq!(oracle.get_finalize_ts(&id).unwrap(), Timestamp::new(50));
        assert_eq!(oracle.get_bond(&id).unwrap(), U256::ZERO);
        assert_eq!(oracle.result_queries(), 3);
    }

    #[test]
    fn templates_get_sequential_ids() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        assert_eq!(oracle.create_template("a").unwrap(), U256::from(5));
        assert_eq!(oracle.create_template("b").unwrap(), U256::from(6));
        assert_eq!(oracle.templates(), vec!["a".to_string(), "b".to_string()]);
    }
}
