//! The module engine: registry, gate and sequencer behind one interface.
//!
//! Every mutating call runs to completion before the next one starts. Oracle
//! and executor failures abort the call before any state is written, except
//! that a failed module transaction leaves the transaction retryable.

use crate::announcement::{mark_ready_calldata, Announcements};
use crate::config::{check_expiration_window, ModuleConfig};
use crate::error::ConfigError;
use crate::event::ModuleEvent;
use crate::gate;
use crate::registry::{Binding, BoundQuestion, ProposalRegistry, RegistryKey};
use crate::sequencer::ExecutedTransactions;
use crate::snapshot::ModuleSnapshot;
use crate::variant::{CooldownAnchor, ModuleVariant, QuestionIdScheme, RegistryIndex};
use crate::ModuleError;
use alloy_primitives::{Address, U256};
use gate_crypto::{build_question, question_hash, transaction_hash, SigningDomain};
use gate_oracle::{Executor, Oracle, QuestionRequest};
use gate_types::{Clock, Operation, QuestionHash, QuestionId, Timestamp, TransactionSpec, TxHash};
use tracing::{debug, info, warn};

/// A proposal as named by a caller: its id, its ordered transaction hashes
/// and, for the id-indexed registry, the question it was asked under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalRef {
    pub id: String,
    pub tx_hashes: Vec<TxHash>,
    /// Only read by the id-indexed registry. When absent the question asked
    /// with retry nonce 0 is assumed.
    pub question_id: Option<QuestionId>,
}

impl ProposalRef {
    pub fn new(id: impl Into<String>, tx_hashes: Vec<TxHash>) -> Self {
        Self {
            id: id.into(),
            tx_hashes,
            question_id: None,
        }
    }

    pub fn with_question_id(mut self, question_id: QuestionId) -> Self {
        self.question_id = Some(question_id);
        self
    }

    pub fn question(&self) -> String {
        build_question(&self.id, &self.tx_hashes)
    }
}

/// Oracle-gated execution module.
pub struct OracleModule<O, E, C> {
    config: Option<ModuleConfig>,
    registry: ProposalRegistry,
    executed: ExecutedTransactions,
    announcements: Announcements,
    oracle: O,
    executor: E,
    clock: C,
    /// Pending events for the host to process.
    pending_events: Vec<ModuleEvent>,
}

impl<O: Oracle, E: Executor, C: Clock> OracleModule<O, E, C> {
    /// An engine that still needs [`setup`](Self::setup).
    pub fn new(oracle: O, executor: E, clock: C) -> Self {
        Self {
            config: None,
            registry: ProposalRegistry::new(),
            executed: ExecutedTransactions::new(),
            announcements: Announcements::new(),
            oracle,
            executor,
            clock,
            pending_events: Vec::new(),
        }
    }

    /// Construct and set up in one step.
    pub fn with_config(
        initiator: Address,
        config: ModuleConfig,
        oracle: O,
        executor: E,
        clock: C,
    ) -> Result<Self, ModuleError> {
        let mut module = Self::new(oracle, executor, clock);
        module.setup(initiator, config)?;
        Ok(module)
    }

    /// Rebuild an engine from a config and a persisted snapshot. Emits no
    /// set-up event.
    pub fn restore(
        config: ModuleConfig,
        snapshot: ModuleSnapshot,
        oracle: O,
        executor: E,
        clock: C,
    ) -> Result<Self, ModuleError> {
        config.validate()?;
        Ok(Self {
            config: Some(config),
            registry: snapshot.registry,
            executed: snapshot.executed,
            announcements: snapshot.announcements,
            oracle,
            executor,
            clock,
            pending_events: Vec::new(),
        })
    }

    /// Apply the initial configuration. Allowed exactly once.
    pub fn setup(&mut self, initiator: Address, config: ModuleConfig) -> Result<(), ModuleError> {
        if self.config.is_some() {
            return Err(ModuleError::AlreadyInitialized);
        }
        config.validate()?;

        info!(
            initiator = %initiator,
            owner = %config.owner,
            avatar = %config.avatar,
            target = %config.target,
            variant = %config.variant,
            "module set up"
        );
        self.pending_events.push(ModuleEvent::ModuleSetUp {
            initiator,
            owner: config.owner,
            avatar: config.avatar,
            target: config.target,
        });
        self.config = Some(config);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Result<&ModuleConfig, ModuleError> {
        self.config.as_ref().ok_or(ModuleError::NotInitialized)
    }

    fn config_mut(&mut self) -> Result<&mut ModuleConfig, ModuleError> {
        self.config.as_mut().ok_or(ModuleError::NotInitialized)
    }

    pub fn variant(&self) -> Result<ModuleVariant, ModuleError> {
        Ok(self.config()?.module_variant())
    }

    fn only_owner(&self, caller: Address) -> Result<&ModuleConfig, ModuleError> {
        let config = self.config()?;
        if caller != config.owner {
            return Err(ModuleError::NotOwner);
        }
        Ok(config)
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Drain pending events for the host to process.
    pub fn drain_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Hashing & identity ─────────────────────────────────────────────

    pub fn domain(&self) -> Result<SigningDomain, ModuleError> {
        Ok(signing_domain(self.config()?))
    }

    /// EIP-712 hash of `tx` under this module's domain.
    pub fn get_transaction_hash(&self, tx: &TransactionSpec) -> Result<TxHash, ModuleError> {
        Ok(transaction_hash(&self.domain()?, tx))
    }

    pub fn build_question(&self, proposal_id: &str, tx_hashes: &[TxHash]) -> String {
        build_question(proposal_id, tx_hashes)
    }

    /// The id the oracle will assign to `question` asked with `nonce` under
    /// the current parameters.
    pub fn get_question_id(&self, question: &str, nonce: U256) -> Result<QuestionId, ModuleError> {
        Ok(self.config()?.question_id(question, nonce))
    }

    // ── Proposal registry ──────────────────────────────────────────────

    /// Ask the oracle about a proposal and bind the question to it.
    pub fn add_proposal(
        &mut self,
        proposal_id: &str,
        tx_hashes: &[TxHash],
    ) -> Result<QuestionId, ModuleError> {
        self.add_proposal_with_nonce(proposal_id, tx_hashes, U256::ZERO)
    }

    /// Ask again under retry `nonce`. For `nonce > 0` the previous question
    /// must have resolved to the invalidated sentinel.
    pub fn add_proposal_with_nonce(
        &mut self,
        proposal_id: &str,
        tx_hashes: &[TxHash],
        nonce: U256,
    ) -> Result<QuestionId, ModuleError> {
        let config = self.config()?.clone();
        let variant = config.module_variant();
        let question = build_question(proposal_id, tx_hashes);
        let q_hash = question_hash(&question);
        let expected = config.question_id(&question, nonce);
        let key = ProposalRegistry::key(variant.registry, q_hash, expected);

        match variant.registry {
            RegistryIndex::ByHash => match (nonce.is_zero(), self.registry.get(&key)) {
                (true, Binding::Unset) => {}
                (true, _) => return Err(ModuleError::ProposalAlreadySubmitted),
                (false, Binding::Invalidated) => return Err(ModuleError::ProposalMarkedInvalid),
                (false, Binding::Unset) => return Err(ModuleError::PreviousNotInvalidated),
                (false, Binding::Bound(previous)) => {
                    self.ensure_answer_invalidated(&previous.question_id)?
                }
            },
            RegistryIndex::ById => {
                if self.registry.is_hash_blocked(&q_hash) {
                    return Err(if nonce.is_zero() {
                        ModuleError::ProposalAlreadySubmitted
                    } else {
                        ModuleError::ProposalMarkedInvalid
                    });
                }
                if self.registry.get(&key) != Binding::Unset {
                    return Err(ModuleError::ProposalAlreadySubmitted);
                }
                // Question ids move with the parameters; the latest bound id
                // is what identifies an asked proposal.
                let latest = self.registry.latest_question_id(&q_hash);
                match (nonce.is_zero(), latest) {
                    (true, None) => {}
                    (true, Some(_)) => return Err(ModuleError::ProposalAlreadySubmitted),
                    (false, latest) => {
                        let previous = latest.unwrap_or_else(|| {
                            config.question_id(&question, nonce - U256::from(1))
                        });
                        self.ensure_answer_invalidated(&previous)?;
                    }
                }
            }
        }

        let request = QuestionRequest {
            template: config.template,
            question,
            arbitrator: config.arbitrator,
            timeout: config.timeout,
            opening_ts: 0,
            nonce,
        };
        let returned = match variant.question_ids {
            QuestionIdScheme::Explicit => self.oracle.ask_question(&request)?,
            QuestionIdScheme::MinBond => self
                .oracle
                .ask_question_with_min_bond(&request, config.minimum_bond)?,
        };
        if returned != expected {
            warn!(expected = %expected, returned = %returned, proposal_id, "oracle returned unexpected question id");
            return Err(ModuleError::UnexpectedQuestionId {
                expected,
                actual: returned,
            });
        }

        let bound = BoundQuestion {
            question_id: expected,
            question_hash: q_hash,
        };
        if !self.registry.bind(key, bound) {
            return Err(ModuleError::ProposalMarkedInvalid);
        }

        info!(question_id = %expected, proposal_id, nonce = %nonce, "proposal question created");
        self.pending_events.push(ModuleEvent::ProposalQuestionCreated {
            question_id: expected,
            proposal_id: proposal_id.to_string(),
        });
        Ok(expected)
    }

    fn ensure_answer_invalidated(&self, question_id: &QuestionId) -> Result<(), ModuleError> {
        let answer = self.oracle.result_for(question_id)?;
        if !answer.is_invalidated() {
            debug!(question_id = %question_id, answer = %answer, "previous question still valid");
            return Err(ModuleError::PreviousNotInvalidated);
        }
        Ok(())
    }

    /// Owner-only. Invalidate a proposal whatever the oracle says. Unknown
    /// proposals are blocked pre-emptively.
    ///
    /// Id-indexed: an explicit question id invalidates that question only;
    /// otherwise the latest bound question is invalidated, or the whole
    /// proposal if none was bound yet.
    pub fn mark_proposal_as_invalid(
        &mut self,
        caller: Address,
        proposal: &ProposalRef,
    ) -> Result<(), ModuleError> {
        let index = self.only_owner(caller)?.module_variant().registry;
        let q_hash = question_hash(&proposal.question());
        let key = match (index, proposal.question_id) {
            (RegistryIndex::ById, Some(question_id)) => RegistryKey::Id(question_id),
            _ => self.registry.live_key(index, q_hash),
        };
        self.invalidate(key, q_hash, false);
        Ok(())
    }

    /// Owner-only. Invalidate by question hash.
    pub fn mark_proposal_as_invalid_by_hash(
        &mut self,
        caller: Address,
        question_hash: QuestionHash,
    ) -> Result<(), ModuleError> {
        let index = self.only_owner(caller)?.module_variant().registry;
        let key = self.registry.live_key(index, question_hash);
        self.invalidate(key, question_hash, false);
        Ok(())
    }

    /// Permissionless. Invalidate a proposal whose accepted answer is older
    /// than the answer expiration.
    pub fn mark_proposal_with_expired_answer_as_invalid(
        &mut self,
        question_hash: QuestionHash,
    ) -> Result<(), ModuleError> {
        let config = self.config()?;
        let variant = config.module_variant();
        let expiration = config.answer_expiration;
        if expiration == 0 || !variant.applies_expiration() {
            return Err(ModuleError::AnswersValidForever);
        }
        let key = self.registry.live_key(variant.registry, question_hash);
        let question_id = match self.registry.get(&key) {
            Binding::Invalidated => return Err(ModuleError::AlreadyInvalidated),
            Binding::Unset => return Err(ModuleError::NoQuestionId),
            Binding::Bound(bound) => bound.question_id,
        };

        if !self.oracle.result_for(&question_id)?.is_accepted() {
            return Err(ModuleError::OnlyPositiveAnswersCanExpire);
        }
        let finalized_at = self.oracle.get_finalize_ts(&question_id)?;
        gate::check_expired(finalized_at.elapsed_since(self.clock.now()), expiration)?;

        self.invalidate(key, question_hash, true);
        Ok(())
    }

    fn invalidate(&mut self, key: RegistryKey, question_hash: QuestionHash, expired: bool) {
        let previous = self.registry.invalidate(key);
        if previous.is_invalidated() {
            return;
        }
        let question_id = match (key, previous) {
            (RegistryKey::Id(id), _) => Some(id),
            (RegistryKey::Hash(_), Binding::Bound(bound)) => Some(bound.question_id),
            (RegistryKey::Hash(_), _) => None,
        };
        info!(question_hash = %question_hash, expired, "proposal invalidated");
        self.pending_events.push(ModuleEvent::ProposalInvalidated {
            question_hash,
            question_id,
            expired,
        });
    }

    /// Binding of the proposal with this question hash.
    pub fn binding_for_hash(&self, question_hash: &QuestionHash) -> Result<Binding, ModuleError> {
        let index = self.variant()?.registry;
        Ok(self.registry.get(&self.registry.live_key(index, *question_hash)))
    }

    /// Binding of a question id in the id-indexed registry.
    pub fn binding_for_question(&self, question_id: &QuestionId) -> Binding {
        self.registry.get(&RegistryKey::Id(*question_id))
    }

    // ── Readiness announcements ────────────────────────────────────────

    /// Ask the controlled account to announce the proposal ready. The
    /// announcement is recorded only if the account accepts the call.
    pub fn request_proposal_ready_for_execution(
        &mut self,
        proposal_id: &str,
        tx_hashes: &[TxHash],
    ) -> Result<(), ModuleError> {
        let config = self.announcing_config()?;
        let module = config.module;
        let question = build_question(proposal_id, tx_hashes);
        let question_id = self.live_question_id(config, &question);
        self.check_ready(&question_id, &question)?;

        let data = mark_ready_calldata(proposal_id, tx_hashes);
        let accepted = self
            .executor
            .exec_transaction_from_module(module, U256::ZERO, &data, Operation::Call)?;
        if !accepted {
            warn!(question_id = %question_id, proposal_id, "controlled account refused readiness call");
            return Err(ModuleError::ReadinessRequestFailed);
        }
        self.record_announcement(question_id, question);
        Ok(())
    }

    /// Avatar-only. Announce a proposal with an approved answer as ready.
    pub fn mark_proposal_ready_for_execution(
        &mut self,
        caller: Address,
        proposal_id: &str,
        tx_hashes: &[TxHash],
    ) -> Result<(), ModuleError> {
        let config = self.announcing_config()?;
        if caller != config.avatar {
            return Err(ModuleError::NotAvatar);
        }
        let question = build_question(proposal_id, tx_hashes);
        let question_id = self.live_question_id(config, &question);
        self.check_ready(&question_id, &question)?;
        self.record_announcement(question_id, question);
        Ok(())
    }

    pub fn execution_announcement(&self, question_id: &QuestionId, question: &str) -> Option<Timestamp> {
        self.announcements.get(question_id, question)
    }

    fn announcing_config(&self) -> Result<&ModuleConfig, ModuleError> {
        let config = self.config()?;
        if !config.module_variant().requires_announcement() {
            return Err(ModuleError::AnnouncementsDisabled);
        }
        Ok(config)
    }

    /// The latest question bound for `question`, else the one it would be
    /// asked under with retry nonce 0.
    fn live_question_id(&self, config: &ModuleConfig, question: &str) -> QuestionId {
        self.registry
            .latest_question_id(&question_hash(question))
            .unwrap_or_else(|| config.question_id(question, U256::ZERO))
    }

    fn check_ready(&self, question_id: &QuestionId, question: &str) -> Result<(), ModuleError> {
        if self.registry.is_hash_blocked(&question_hash(question)) {
            return Err(ModuleError::ProposalInvalidated);
        }
        if !self.oracle.result_for(question_id)?.is_accepted() {
            return Err(ModuleError::NotApproved);
        }
        if self.announcements.get(question_id, question).is_some() {
            return Err(ModuleError::AlreadyMarkedReady);
        }
        Ok(())
    }

    fn record_announcement(&mut self, question_id: QuestionId, question: String) {
        let now = self.clock.now();
        self.announcements.record(question_id, &question, now);
        info!(question_id = %question_id, at = %now, "proposal marked ready for execution");
        self.pending_events.push(ModuleEvent::ExecutionAnnouncement {
            question_id,
            question,
        });
    }

    // ── Execution ──────────────────────────────────────────────────────

    /// Execute the first transaction of the proposal not yet executed.
    /// Returns its index.
    pub fn execute_proposal(
        &mut self,
        proposal: &ProposalRef,
        tx: &TransactionSpec,
    ) -> Result<usize, ModuleError> {
        let q_hash = question_hash(&proposal.question());
        let index = self
            .executed
            .next_index(&q_hash, &proposal.tx_hashes)
            .ok_or(ModuleError::NothingToExecute)?;
        self.execute_proposal_with_index(proposal, tx, index)?;
        Ok(index)
    }

    /// Execute `tx` as position `index` of the proposal.
    pub fn execute_proposal_with_index(
        &mut self,
        proposal: &ProposalRef,
        tx: &TransactionSpec,
        index: usize,
    ) -> Result<(), ModuleError> {
        let config = self.config()?;
        let variant = config.module_variant();
        let question = proposal.question();
        let q_hash = question_hash(&question);
        let expected_tx_hash = *proposal
            .tx_hashes
            .get(index)
            .ok_or(ModuleError::IndexOutOfRange {
                index,
                len: proposal.tx_hashes.len(),
            })?;
        let now = self.clock.now();

        let question_id = self.resolve_for_execution(config, variant, proposal, &question, q_hash)?;
        match variant.cooldown_anchor {
            CooldownAnchor::Finalization => {
                gate::check_resolved_answer(&self.oracle, &question_id, config, variant, now)?
            }
            CooldownAnchor::Announcement => {
                let announced_at = self
                    .announcements
                    .get(&question_id, &question)
                    .ok_or(ModuleError::NotMarkedReady)?;
                gate::check_cooldown(announced_at.elapsed_since(now), config.cooldown)?;
            }
        }

        let tx_hash = transaction_hash(&signing_domain(config), tx);
        if tx_hash != expected_tx_hash {
            debug!(index, expected = %expected_tx_hash, actual = %tx_hash, "transaction does not match proposal");
            return Err(ModuleError::UnexpectedTransactionHash);
        }
        self.executed.check_order(&q_hash, &proposal.tx_hashes, index)?;

        let success = self
            .executor
            .exec_transaction_from_module(tx.to, tx.value, &tx.data, tx.operation)?;
        if !success {
            warn!(question_id = %question_id, index, to = %tx.to, "module transaction failed");
            return Err(ModuleError::TransactionFailed);
        }

        self.executed.mark_executed(q_hash, tx_hash);
        info!(question_id = %question_id, proposal_id = %proposal.id, index, tx_hash = %tx_hash, "module transaction executed");
        self.pending_events.push(ModuleEvent::TransactionExecuted {
            question_hash: q_hash,
            tx_hash,
            index,
        });
        Ok(())
    }

    fn resolve_for_execution(
        &self,
        config: &ModuleConfig,
        variant: ModuleVariant,
        proposal: &ProposalRef,
        question: &str,
        q_hash: QuestionHash,
    ) -> Result<QuestionId, ModuleError> {
        match variant.registry {
            RegistryIndex::ByHash => match self.registry.get(&RegistryKey::Hash(q_hash)) {
                Binding::Unset => Err(ModuleError::NoQuestionId),
                Binding::Invalidated => Err(ModuleError::ProposalInvalidated),
                Binding::Bound(bound) => Ok(bound.question_id),
            },
            RegistryIndex::ById => {
                if self.registry.is_hash_blocked(&q_hash) {
                    return Err(ModuleError::ProposalInvalidated);
                }
                let question_id = proposal
                    .question_id
                    .unwrap_or_else(|| self.live_question_id(config, question));
                match self.registry.get(&RegistryKey::Id(question_id)) {
                    Binding::Invalidated => Err(ModuleError::ProposalInvalidated),
                    Binding::Bound(bound) if bound.question_hash != q_hash => {
                        Err(ModuleError::QuestionNotForProposal)
                    }
                    Binding::Bound(_) => Ok(question_id),
                    // Announced proposals are gated by their announcement.
                    Binding::Unset if variant.requires_announcement() => Ok(question_id),
                    Binding::Unset => Err(ModuleError::NoQuestionId),
                }
            }
        }
    }

    pub fn is_executed(&self, question_hash: &QuestionHash, tx_hash: &TxHash) -> bool {
        self.executed.is_executed(question_hash, tx_hash)
    }

    // ── Owner setters ──────────────────────────────────────────────────

    pub fn set_question_timeout(&mut self, caller: Address, timeout: u32) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        if timeout == 0 {
            return Err(ConfigError::ZeroTimeout.into());
        }
        self.config_mut()?.timeout = timeout;
        info!(timeout, "question timeout set");
        self.pending_events.push(ModuleEvent::QuestionTimeoutSet(timeout));
        Ok(())
    }

    pub fn set_question_cooldown(&mut self, caller: Address, cooldown: u32) -> Result<(), ModuleError> {
        let expiration = self.only_owner(caller)?.answer_expiration;
        check_expiration_window(cooldown, expiration)?;
        self.config_mut()?.cooldown = cooldown;
        info!(cooldown, "question cooldown set");
        self.pending_events.push(ModuleEvent::QuestionCooldownSet(cooldown));
        Ok(())
    }

    /// `0` makes accepted answers valid forever.
    pub fn set_answer_expiration(&mut self, caller: Address, expiration: u32) -> Result<(), ModuleError> {
        let cooldown = self.only_owner(caller)?.cooldown;
        check_expiration_window(cooldown, expiration)?;
        self.config_mut()?.answer_expiration = expiration;
        info!(expiration, "answer expiration set");
        self.pending_events.push(ModuleEvent::AnswerExpirationSet(expiration));
        Ok(())
    }

    pub fn set_arbitrator(&mut self, caller: Address, arbitrator: Address) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        self.config_mut()?.arbitrator = arbitrator;
        info!(arbitrator = %arbitrator, "arbitrator set");
        self.pending_events.push(ModuleEvent::ArbitratorSet(arbitrator));
        Ok(())
    }

    pub fn set_minimum_bond(&mut self, caller: Address, bond: U256) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        self.config_mut()?.minimum_bond = bond;
        info!(bond = %bond, "minimum bond set");
        self.pending_events.push(ModuleEvent::MinimumBondSet(bond));
        Ok(())
    }

    pub fn set_template(&mut self, caller: Address, template: U256) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        self.apply_template(template)
    }

    /// Register `template` with the oracle and adopt the returned id.
    pub fn create_template(&mut self, caller: Address, template: &str) -> Result<U256, ModuleError> {
        self.only_owner(caller)?;
        let template_id = self.oracle.create_template(template)?;
        self.apply_template(template_id)?;
        Ok(template_id)
    }

    fn apply_template(&mut self, template: U256) -> Result<(), ModuleError> {
        self.config_mut()?.template = template;
        info!(template = %template, "question template set");
        self.pending_events.push(ModuleEvent::TemplateSet(template));
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        if new_owner == Address::ZERO {
            return Err(ConfigError::ZeroOwner.into());
        }
        let config = self.config_mut()?;
        let previous = std::mem::replace(&mut config.owner, new_owner);
        info!(previous = %previous, new = %new_owner, "ownership transferred");
        self.pending_events.push(ModuleEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    pub fn set_avatar(&mut self, caller: Address, avatar: Address) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        if avatar == Address::ZERO {
            return Err(ConfigError::ZeroAvatar.into());
        }
        let config = self.config_mut()?;
        let previous = std::mem::replace(&mut config.avatar, avatar);
        info!(previous = %previous, new = %avatar, "avatar set");
        self.pending_events.push(ModuleEvent::AvatarSet {
            previous,
            new: avatar,
        });
        Ok(())
    }

    pub fn set_target(&mut self, caller: Address, target: Address) -> Result<(), ModuleError> {
        self.only_owner(caller)?;
        if target == Address::ZERO {
            return Err(ConfigError::ZeroTarget.into());
        }
        let config = self.config_mut()?;
        let previous = std::mem::replace(&mut config.target, target);
        info!(previous = %previous, new = %target, "target set");
        self.pending_events.push(ModuleEvent::TargetSet {
            previous,
            new: target,
        });
        Ok(())
    }

    // ── Persistence ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot {
            registry: self.registry.clone(),
            executed: self.executed.clone(),
            announcements: self.announcements.clone(),
        }
    }

    /// Serialize registry, executed set and announcements.
    pub fn save_state(&self) -> Result<Vec<u8>, ModuleError> {
        self.snapshot().to_bytes()
    }

    /// Replace registry, executed set and announcements with a saved state.
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), ModuleError> {
        let snapshot = ModuleSnapshot::from_bytes(data)?;
        self.registry = snapshot.registry;
        self.executed = snapshot.executed;
        self.announcements = snapshot.announcements;
        debug!(
            bindings = self.registry.len(),
            executed = self.executed.len(),
            announcements = self.announcements.len(),
            "module state loaded"
        );
        Ok(())
    }
}

fn signing_domain(config: &ModuleConfig) -> SigningDomain {
    SigningDomain::new(config.chain_id, config.module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantKind;
    use gate_nullables::{NullClock, NullExecutor, NullOracle};

    const OWNER: Address = Address::repeat_byte(0x01);
    const AVATAR: Address = Address::repeat_byte(0x02);
    const ORACLE: Address = Address::repeat_byte(0x04);
    const MODULE: Address = Address::repeat_byte(0x05);

    fn config() -> ModuleConfig {
        let mut config = ModuleConfig::new(OWNER, AVATAR, AVATAR, ORACLE, MODULE);
        config.timeout = 42;
        config.cooldown = 23;
        config.template = U256::from(1337);
        config.variant = VariantKind::Bonded;
        config
    }

    fn module() -> OracleModule<NullOracle, NullExecutor, NullClock> {
        OracleModule::with_config(
            OWNER,
            config(),
            NullOracle::new(ORACLE, MODULE),
            NullExecutor::new(),
            NullClock::new(1_000),
        )
        .unwrap()
    }

    #[test]
    fn setup_emits_event_once() {
        let mut module = module();
        let events = module.drain_events();
        assert_eq!(
            events,
            vec![ModuleEvent::ModuleSetUp {
                initiator: OWNER,
                owner: OWNER,
                avatar: AVATAR,
                target: AVATAR,
            }]
        );
        assert!(matches!(
            module.setup(OWNER, config()),
            Err(ModuleError::AlreadyInitialized)
        ));
        assert!(module.drain_events().is_empty());
    }

    #[test]
    fn uninitialized_module_rejects_calls() {
        let mut module = OracleModule::new(
            NullOracle::new(ORACLE, MODULE),
            NullExecutor::new(),
            NullClock::new(0),
        );
        assert!(!module.is_initialized());
        assert!(matches!(
            module.add_proposal("p", &[]),
            Err(ModuleError::NotInitialized)
        ));
    }

    #[test]
    fn setup_validates_config() {
        let mut config = config();
        config.timeout = 0;
        let result = OracleModule::with_config(
            OWNER,
            config,
            NullOracle::new(ORACLE, MODULE),
            NullExecutor::new(),
            NullClock::new(0),
        );
        assert!(matches!(
            result.err(),
            Some(ModuleError::Config(ConfigError::ZeroTimeout))
        ));
    }

    #[test]
    fn setters_are_owner_only() {
        let mut module = module();
        let stranger = Address::repeat_byte(0x99);
        assert!(matches!(module.set_question_timeout(stranger, 5), Err(ModuleError::NotOwner)));
        assert!(matches!(module.set_question_cooldown(stranger, 5), Err(ModuleError::NotOwner)));
        assert!(matches!(module.set_answer_expiration(stranger, 0), Err(ModuleError::NotOwner)));
        assert!(matches!(module.set_arbitrator(stranger, stranger), Err(ModuleError::NotOwner)));
        assert!(matches!(module.set_minimum_bond(stranger, U256::from(1)), Err(ModuleError::NotOwner)));
        assert!(matches!(module.set_template(stranger, U256::from(1)), Err(ModuleError::NotOwner)));
        assert!(matches!(module.transfer_ownership(stranger, stranger), Err(ModuleError::NotOwner)));
        assert!(matches!(
            module.mark_proposal_as_invalid_by_hash(stranger, QuestionHash::new([1; 32])),
            Err(ModuleError::NotOwner)
        ));
    }

    #[test]
    fn timeout_must_be_positive() {
        let mut module = module();
        assert!(matches!(
            module.set_question_timeout(OWNER, 0),
            Err(ModuleError::Config(ConfigError::ZeroTimeout))
        ));
        module.set_question_timeout(OWNER, 511).unwrap();
        assert_eq!(module.config().unwrap().timeout, 511);
    }

    #[test]
    fn cooldown_and_expiration_keep_sixty_second_window() {
        let mut module = module();
        module.set_answer_expiration(OWNER, 83).unwrap();
        assert!(matches!(
            module.set_question_cooldown(OWNER, 24),
            Err(ModuleError::Config(ConfigError::ExpirationWindowTooShort { .. }))
        ));
        assert!(matches!(
            module.set_answer_expiration(OWNER, 82),
            Err(ModuleError::Config(ConfigError::ExpirationWindowTooShort { .. }))
        ));
        module.set_answer_expiration(OWNER, 0).unwrap();
        module.set_question_cooldown(OWNER, 10_000).unwrap();
        assert_eq!(module.config().unwrap().cooldown, 10_000);
    }

    #[test]
    fn setters_emit_events() {
        let mut module = module();
        module.drain_events();
        module.set_arbitrator(OWNER, Address::repeat_byte(0x33)).unwrap();
        module.set_minimum_bond(OWNER, U256::from(7)).unwrap();
        module.set_template(OWNER, U256::from(2)).unwrap();
        assert_eq!(
            module.drain_events(),
            vec![
                ModuleEvent::ArbitratorSet(Address::repeat_byte(0x33)),
                ModuleEvent::MinimumBondSet(U256::from(7)),
                ModuleEvent::TemplateSet(U256::from(2)),
            ]
        );
    }

    #[test]
    fn ownership_transfer_moves_owner_rights() {
        let mut module = module();
        let new_owner = Address::repeat_byte(0x77);
        assert!(matches!(
            module.transfer_ownership(OWNER, Address::ZERO),
            Err(ModuleError::Config(ConfigError::ZeroOwner))
        ));
        module.transfer_ownership(OWNER, new_owner).unwrap();
        assert!(matches!(module.set_question_timeout(OWNER, 5), Err(ModuleError::NotOwner)));
        module.set_question_timeout(new_owner, 5).unwrap();
    }

    #[test]
    fn avatar_and_target_must_be_nonzero() {
        let mut module = module();
        assert!(matches!(
            module.set_avatar(OWNER, Address::ZERO),
            Err(ModuleError::Config(ConfigError::ZeroAvatar))
        ));
        assert!(matches!(
            module.set_target(OWNER, Address::ZERO),
            Err(ModuleError::Config(ConfigError::ZeroTarget))
        ));
        module.set_avatar(OWNER, Address::repeat_byte(0x21)).unwrap();
        module.set_target(OWNER, Address::repeat_byte(0x22)).unwrap();
        let config = module.config().unwrap();
        assert_eq!(config.avatar, Address::repeat_byte(0x21));
        assert_eq!(config.target, Address::repeat_byte(0x22));
    }

    #[test]
    fn create_template_adopts_oracle_id() {
        let mut module = module();
        let id = module
            .create_template(OWNER, crate::config::DEFAULT_TEMPLATE)
            .unwrap();
        assert_eq!(module.config().unwrap().template, id);
        assert_eq!(module.oracle().templates(), vec![crate::config::DEFAULT_TEMPLATE.to_string()]);
    }

    #[test]
    fn announcements_disabled_outside_announced_variant() {
        let mut module = module();
        assert!(matches!(
            module.mark_proposal_ready_for_execution(AVATAR, "p", &[]),
            Err(ModuleError::AnnouncementsDisabled)
        ));
    }

    #[test]
    fn question_id_depends_on_variant() {
        let bonded = module();
        let question = bonded.build_question("p", &[]);
        let bonded_id = bonded.get_question_id(&question, U256::ZERO).unwrap();

        let mut plain_config = config();
        plain_config.variant = VariantKind::Plain;
        let plain = OracleModule::with_config(
            OWNER,
            plain_config,
            NullOracle::new(ORACLE, MODULE),
            NullExecutor::new(),
            NullClock::new(0),
        )
        .unwrap();
        assert_ne!(bonded_id, plain.get_question_id(&question, U256::ZERO).unwrap());
    }
}
