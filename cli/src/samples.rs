use strum::{AsRefStr, EnumIter, EnumString};

/// Canned emails for trying the classifier without typing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Sample {
  Suporte,
  Status,
  Natal,
  Agradecimento,
}

impl Sample {
  pub fn text(&self) -> &'static str {
    match self {
      Sample::Suporte => SUPORTE,
      Sample::Status => STATUS,
      Sample::Natal => NATAL,
      Sample::Agradecimento => AGRADECIMENTO,
    }
  }
}

const SUPORTE: &str = "Prezado Suporte,

Estou enfrentando dificuldades para acessar o sistema de gestão financeira desde ontem às 14h.

Ao tentar fazer login, recebo a mensagem \"Erro de autenticação - código 500\". Já tentei limpar o cache do navegador e usar outro dispositivo, mas o problema persiste.

Meu usuário é joao.silva@empresa.com e preciso urgentemente acessar os relatórios do trimestre para a reunião de amanhã.

Poderiam verificar o que está acontecendo e me ajudar a resolver?

Obrigado,
João Silva
Departamento Financeiro
Ramal: 2345";

const STATUS: &str = "Olá equipe,

Gostaria de solicitar uma atualização sobre o status do chamado #45678 aberto na semana passada referente à integração do módulo de pagamentos.

O prazo inicial era para sexta-feira e ainda não recebi nenhum retorno sobre o andamento.

Precisamos dessa funcionalidade operacional até o final do mês para a migração do sistema.

Aguardo retorno,
Maria Santos
Gerente de Projetos";

const NATAL: &str = "Prezados colegas,

Com a chegada do fim de ano, gostaria de desejar a todos um Feliz Natal e um próspero Ano Novo!

Que 2024 seja repleto de realizações, saúde e muitas conquistas profissionais e pessoais.

Agradeço a parceria ao longo deste ano e espero que possamos continuar trabalhando juntos com a mesma dedicação.

Boas festas!

Abraços,
Carlos Oliveira
Diretor Comercial";

const AGRADECIMENTO: &str = "Olá pessoal!

Gostaria de agradecer a todos que participaram do evento de confraternização da empresa na última sexta-feira.

Foi uma noite muito especial e fico feliz em ver o quanto nossa equipe está unida.

Parabéns a todos pelo excelente trabalho realizado este ano!

Um grande abraço,
Ana Paula
RH";

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn test_lookup_by_name() {
    assert_eq!(Sample::from_str("natal").unwrap(), Sample::Natal);
    assert!(Sample::from_str("spam").is_err());
  }

  #[test]
  fn test_every_sample_is_submittable() {
    for sample in Sample::iter() {
      assert!(
        mail_triage_client::validate_text_submission(sample.text()).is_ok(),
        "{} should not be blank",
        sample.as_ref()
      );
    }
  }
}
